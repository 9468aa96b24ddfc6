//! Domain Services - Pure text and scoring logic

pub mod confidence;
pub mod rewrite;
