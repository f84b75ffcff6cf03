//! Strata Core - Hexagonal Architecture Implementation
//!
//! Domain and application layers for the strata project composer: a base
//! template plus optional overlays become one project directory with a
//! single merged `package.json`.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           strata-cli (CLI)              │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ProvisioningService, ManifestService) │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, TemplateSource, Installer) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     strata-adapters (Infrastructure)    │
//! │ (LocalFilesystem, GitTemplateSource...) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use strata_core::prelude::*;
//!
//! let descriptor = ProjectDescriptor::builder()
//!     .name("my-app")?
//!     .provider(AuthProvider::Clerk)
//!     .ui(UiLibrary::Shadcn)
//!     .build()?;
//!
//! let service = ProvisioningService::new(fs, templates, installer, vcs);
//! let report = service.provision(
//!     &ProvisionRequest {
//!         descriptor: &descriptor,
//!         workspace: Path::new("."),
//!         cache_dir: &cache,
//!         options: ProvisionOptions::default(),
//!     },
//!     &NoopReporter,
//! )?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

pub mod prelude {
    pub use crate::application::{
        ProvisionReport, ProvisionRequest, ProvisioningService, StepStatus,
        ports::{
            Filesystem, NoopReporter, PackageInstaller, ProgressReporter, TemplateSource,
            VersionControl,
        },
    };
    pub use crate::domain::{
        AuthProvider, PackageManager, ProjectDescriptor, ProjectName, ProvisionOptions,
        ProvisionStep, TemplateLayer, UiLibrary,
    };
    pub use crate::error::{ErrorCategory, StrataError, StrataResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
