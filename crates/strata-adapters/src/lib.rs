//! Infrastructure adapters for strata.
//!
//! This crate implements the ports defined in `strata-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod process;
pub mod template_source;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use process::{CommandInstaller, GitVersionControl};
pub use template_source::{DEFAULT_TEMPLATE_REPOSITORY, GitTemplateSource, LocalTemplateSource};
