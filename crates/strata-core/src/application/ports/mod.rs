//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `strata-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateSource`: Template release resolution and download
//!   - `PackageInstaller`: Dependency installation
//!   - `VersionControl`: Repository initialization
//!   - `ProgressReporter`: Step-by-step progress display

pub mod output;

pub use output::{
    DirEntry, EntryKind, Filesystem, NoopReporter, PackageInstaller, ProgressReporter,
    TemplateSource, VersionControl,
};

#[cfg(test)]
pub use output::{
    MockFilesystem, MockPackageInstaller, MockProgressReporter, MockTemplateSource,
    MockVersionControl,
};
