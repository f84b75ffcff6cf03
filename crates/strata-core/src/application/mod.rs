//! Application layer for strata.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProvisioningService and the per-step services)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Merging and validation live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{
    DirectoryComposer, EnvOutcome, EnvService, FragmentCollector, ManifestService,
    ProvisionReport, ProvisionRequest, ProvisioningService, StepRecord, StepStatus,
};

pub use ports::{
    Filesystem, PackageInstaller, ProgressReporter, TemplateSource, VersionControl,
};

pub use error::ApplicationError;
