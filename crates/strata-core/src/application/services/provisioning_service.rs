//! Provisioning Service - main application orchestrator.
//!
//! Runs the fixed step sequence:
//! 1. Validate the name and claim the destination
//! 2. Resolve and fetch the template release
//! 3. Compose the base layer, then each selected overlay
//! 4. Merge manifest fragments
//! 5. Synthesize `.env.local`
//! 6. Install dependencies
//! 7. Initialize version control (best-effort)
//!
//! Every step but the last aborts the run on failure. Nothing is rolled back:
//! a failed run may leave a partially composed directory behind.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, PackageInstaller, ProgressReporter, TemplateSource, VersionControl},
        services::{DirectoryComposer, EnvService, ManifestService},
    },
    domain::{
        DomainError, ProjectDescriptor, ProvisionOptions, ProvisionStep, TemplateLayer,
        plan::plan, validate_project_name,
    },
    error::{StrataError, StrataResult},
};

/// Commit message for the initial commit.
pub const BOOTSTRAP_COMMIT_MESSAGE: &str = "chore: bootstrap from strata";

/// How one step ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "kebab-case")]
pub enum StepStatus {
    Completed,
    Skipped,
    /// Failed without aborting the run.
    Warned(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: ProvisionStep,
    pub status: StepStatus,
}

/// Summary of a run that reached `Success`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionReport {
    pub run_id: Uuid,
    pub project_path: PathBuf,
    pub template_tag: String,
    pub steps: Vec<StepRecord>,
}

impl ProvisionReport {
    pub fn warnings(&self) -> impl Iterator<Item = (&ProvisionStep, &str)> {
        self.steps.iter().filter_map(|r| match &r.status {
            StepStatus::Warned(reason) => Some((&r.step, reason.as_str())),
            _ => None,
        })
    }

    pub fn status_of(&self, step: &ProvisionStep) -> Option<&StepStatus> {
        self.steps
            .iter()
            .find(|r| &r.step == step)
            .map(|r| &r.status)
    }
}

/// Everything a run needs besides the descriptor.
pub struct ProvisionRequest<'a> {
    pub descriptor: &'a ProjectDescriptor,
    /// Parent directory; the project lands in `<workspace>/<name>`.
    pub workspace: &'a Path,
    pub cache_dir: &'a Path,
    pub options: ProvisionOptions,
}

/// Main provisioning service.
pub struct ProvisioningService {
    filesystem: Box<dyn Filesystem>,
    templates: Box<dyn TemplateSource>,
    installer: Box<dyn PackageInstaller>,
    vcs: Box<dyn VersionControl>,
}

/// Per-run state threaded through the steps.
struct RunContext<'a> {
    request: &'a ProvisionRequest<'a>,
    project_path: PathBuf,
    tag: Option<String>,
    templates_root: Option<PathBuf>,
}

impl ProvisioningService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        templates: Box<dyn TemplateSource>,
        installer: Box<dyn PackageInstaller>,
        vcs: Box<dyn VersionControl>,
    ) -> Self {
        Self {
            filesystem,
            templates,
            installer,
            vcs,
        }
    }

    /// Run every step to `Success`, or stop at the first fatal failure.
    #[instrument(
        skip_all,
        fields(
            run_id = tracing::field::Empty,
            project = %request.descriptor.name(),
            workspace = %request.workspace.display()
        )
    )]
    pub fn provision(
        &self,
        request: &ProvisionRequest<'_>,
        reporter: &dyn ProgressReporter,
    ) -> StrataResult<ProvisionReport> {
        let run_id = Uuid::new_v4();
        tracing::Span::current().record("run_id", tracing::field::display(run_id));
        info!(descriptor = %request.descriptor, "Provisioning started");

        let mut ctx = RunContext {
            request,
            project_path: request
                .workspace
                .join(request.descriptor.name().as_str()),
            tag: None,
            templates_root: None,
        };
        let mut records = Vec::new();

        for planned in plan(request.descriptor, request.options) {
            let step = planned.step;
            if !planned.enabled {
                reporter.step_skipped(&step);
                records.push(StepRecord {
                    step,
                    status: StepStatus::Skipped,
                });
                continue;
            }

            reporter.step_started(&step);
            match self.run_step(&step, &mut ctx) {
                Ok(()) => {
                    reporter.step_finished(&step);
                    records.push(StepRecord {
                        step,
                        status: StepStatus::Completed,
                    });
                }
                Err(err) if !step.is_fatal_on_failure() => {
                    let reason = err.to_string();
                    warn!(step = %step, error = %reason, "Non-fatal step failed");
                    reporter.step_warned(&step, &reason);
                    records.push(StepRecord {
                        step,
                        status: StepStatus::Warned(reason),
                    });
                }
                Err(err) => {
                    warn!(step = %step, error = %err, "Provisioning failed");
                    reporter.step_failed(&step, &err.to_string());
                    return Err(err);
                }
            }
        }

        info!(path = %ctx.project_path.display(), "Provisioning completed");

        Ok(ProvisionReport {
            run_id,
            project_path: ctx.project_path,
            template_tag: ctx.tag.unwrap_or_default(),
            steps: records,
        })
    }

    // -------------------------------------------------------------------------
    // Steps
    // -------------------------------------------------------------------------

    fn run_step(&self, step: &ProvisionStep, ctx: &mut RunContext<'_>) -> StrataResult<()> {
        match step {
            ProvisionStep::ValidateName => self.validate_name(ctx),
            ProvisionStep::ResolveTemplates => self.resolve_templates(ctx),
            ProvisionStep::ComposeBase => self.compose(&TemplateLayer::Base, ctx),
            ProvisionStep::ComposeOverlay(name) => {
                self.compose(&TemplateLayer::overlay(name.as_str()), ctx)
            }
            ProvisionStep::MergeManifest => ManifestService::new(self.filesystem.as_ref())
                .merge(&ctx.project_path, ctx.request.descriptor.name())
                .map(|_| ()),
            ProvisionStep::SynthesizeEnv => EnvService::new(self.filesystem.as_ref())
                .synthesize(&ctx.project_path, ctx.request.descriptor.provider())
                .map(|_| ()),
            ProvisionStep::InstallDependencies => self
                .installer
                .install(ctx.request.descriptor.package_manager(), &ctx.project_path),
            ProvisionStep::InitVersionControl => self.init_version_control(&ctx.project_path),
        }
    }

    fn validate_name(&self, ctx: &RunContext<'_>) -> StrataResult<()> {
        let name = ctx.request.descriptor.name();
        validate_project_name(name.as_str()).map_err(|rule| DomainError::InvalidProjectName {
            name: name.to_string(),
            rule,
        })?;

        if self.filesystem.exists(&ctx.project_path) {
            return Err(ApplicationError::ProjectExists {
                path: ctx.project_path.clone(),
            }
            .into());
        }
        Ok(())
    }

    fn resolve_templates(&self, ctx: &mut RunContext<'_>) -> StrataResult<()> {
        let tag = match ctx.request.descriptor.template_tag() {
            Some(tag) => tag.to_string(),
            None => self.templates.resolve_latest_tag()?,
        };
        info!(tag = %tag, "Template release resolved");

        let root = self
            .templates
            .fetch_and_extract(&tag, ctx.request.cache_dir)?;
        ctx.tag = Some(tag);
        ctx.templates_root = Some(root);
        Ok(())
    }

    fn compose(&self, layer: &TemplateLayer, ctx: &RunContext<'_>) -> StrataResult<()> {
        let root = ctx
            .templates_root
            .as_deref()
            .ok_or_else(|| StrataError::Internal {
                message: "templates composed before they were resolved".into(),
            })?;
        DirectoryComposer::new(self.filesystem.as_ref())
            .compose_layer(layer, root, &ctx.project_path)
            .map(|_| ())
    }

    fn init_version_control(&self, project_path: &Path) -> StrataResult<()> {
        self.vcs.init(project_path)?;
        self.vcs.stage_all(project_path)?;
        self.vcs.commit(project_path, BOOTSTRAP_COMMIT_MESSAGE)
    }
}
