//! CLI Commands

pub mod init;
pub mod mappings;
pub mod translate;

pub use init::InitCommand;
pub use mappings::MappingsCommand;
pub use translate::TranslateCommand;
