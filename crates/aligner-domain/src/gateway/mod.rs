//! Gateway Traits - Outbound ports to external services
//!
//! The term oracle lives outside the system (usually an LLM). The domain
//! only knows the two questions it can ask.

pub mod term_oracle;
