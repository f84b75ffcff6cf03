//! Core domain layer for strata.
//!
//! Pure rules with no I/O: name validation, the project descriptor, template
//! layers, manifest merging, and the run plan. Filesystem and process
//! access happens through ports in the application layer.
//!
//! - **No I/O**: everything here works on values
//! - **Immutable values**: descriptors and layers are built once and cloned
//! - **serde_json only as a data type**: manifests are `serde_json` objects

pub mod descriptor;
pub mod error;
pub mod layer;
pub mod manifest;
pub mod plan;
pub mod project_name;
pub mod value_objects;

pub use descriptor::{ProjectDescriptor, ProjectDescriptorBuilder};
pub use error::{DomainError, ErrorCategory};
pub use layer::TemplateLayer;
pub use manifest::{FragmentKind, ManifestDocument, ManifestFragment};
pub use plan::{PlannedStep, ProvisionOptions, ProvisionStep};
pub use project_name::{NameRule, ProjectName, validate_project_name};
pub use value_objects::{AuthProvider, PackageManager, UiLibrary};
