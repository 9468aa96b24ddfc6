//! Domain Models - The vocabulary of the aligner
//!
//! These types represent the "Ubiquitous Language" of vocabulary alignment.
//! Every name here should match how we talk about the system.

pub mod attestation;
pub mod mapping;
pub mod translation;
