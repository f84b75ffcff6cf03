//! Application services - orchestrate use cases.
//!
//! The per-concern services (composer, collector, manifest, env) each take a
//! borrowed `Filesystem` and do one job. `ProvisioningService` owns the ports
//! and drives them through the step sequence.

pub mod collector;
pub mod composer;
pub mod env_service;
pub mod manifest_service;
pub mod provisioning_service;

pub use collector::FragmentCollector;
pub use composer::{ComposeStats, DirectoryComposer};
pub use env_service::{EnvOutcome, EnvService};
pub use manifest_service::{ManifestService, MergeSummary};
pub use provisioning_service::{
    BOOTSTRAP_COMMIT_MESSAGE, ProvisionReport, ProvisionRequest, ProvisioningService, StepRecord,
    StepStatus,
};
