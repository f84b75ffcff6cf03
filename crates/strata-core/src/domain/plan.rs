//! The fixed step sequence of a provisioning run.

use std::fmt;

use serde::Serialize;

use crate::domain::{descriptor::ProjectDescriptor, layer::TemplateLayer};

/// One state of the provisioning state machine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", content = "overlay", rename_all = "kebab-case")]
pub enum ProvisionStep {
    ValidateName,
    ResolveTemplates,
    ComposeBase,
    ComposeOverlay(String),
    MergeManifest,
    SynthesizeEnv,
    InstallDependencies,
    InitVersionControl,
}

impl ProvisionStep {
    /// Short progress message for this step.
    pub fn describe(&self) -> String {
        match self {
            Self::ValidateName => "Validating project name".into(),
            Self::ResolveTemplates => "Fetching templates".into(),
            Self::ComposeBase => "Copying base template".into(),
            Self::ComposeOverlay(name) => format!("Applying overlay '{name}'"),
            Self::MergeManifest => "Merging package.json".into(),
            Self::SynthesizeEnv => "Creating environment file".into(),
            Self::InstallDependencies => "Installing dependencies".into(),
            Self::InitVersionControl => "Initializing git repository".into(),
        }
    }

    /// Whether a failure in this step aborts the run.
    pub const fn is_fatal_on_failure(&self) -> bool {
        !matches!(self, Self::InitVersionControl)
    }
}

impl fmt::Display for ProvisionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidateName => f.write_str("validate-name"),
            Self::ResolveTemplates => f.write_str("resolve-templates"),
            Self::ComposeBase => f.write_str("compose-base"),
            Self::ComposeOverlay(name) => write!(f, "compose-overlay({name})"),
            Self::MergeManifest => f.write_str("merge-manifest"),
            Self::SynthesizeEnv => f.write_str("synthesize-env"),
            Self::InstallDependencies => f.write_str("install-dependencies"),
            Self::InitVersionControl => f.write_str("init-version-control"),
        }
    }
}

/// Run-level switches that are not part of the project itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionOptions {
    pub install: bool,
    pub init_git: bool,
}

impl Default for ProvisionOptions {
    fn default() -> Self {
        Self {
            install: true,
            init_git: true,
        }
    }
}

/// A planned step and whether it will actually run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStep {
    pub step: ProvisionStep,
    pub enabled: bool,
}

/// Build the ordered step list for a descriptor.
///
/// Overlays that the descriptor does not select never appear. Install and
/// version-control steps are always listed, disabled when switched off.
pub fn plan(descriptor: &ProjectDescriptor, options: ProvisionOptions) -> Vec<PlannedStep> {
    let always = |step| PlannedStep {
        step,
        enabled: true,
    };

    let mut steps = vec![
        always(ProvisionStep::ValidateName),
        always(ProvisionStep::ResolveTemplates),
        always(ProvisionStep::ComposeBase),
    ];
    steps.extend(descriptor.overlays().into_iter().filter_map(|layer| match layer {
        TemplateLayer::Overlay(name) => Some(always(ProvisionStep::ComposeOverlay(name))),
        TemplateLayer::Base => None,
    }));
    steps.push(always(ProvisionStep::MergeManifest));
    steps.push(always(ProvisionStep::SynthesizeEnv));
    steps.push(PlannedStep {
        step: ProvisionStep::InstallDependencies,
        enabled: options.install,
    });
    steps.push(PlannedStep {
        step: ProvisionStep::InitVersionControl,
        enabled: options.init_git,
    });
    steps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AuthProvider, UiLibrary};

    fn descriptor(provider: AuthProvider, ui: UiLibrary, storybook: bool) -> ProjectDescriptor {
        ProjectDescriptor::builder()
            .name("my-app")
            .unwrap()
            .provider(provider)
            .ui(ui)
            .storybook(storybook)
            .build()
            .unwrap()
    }

    fn step_names(steps: &[PlannedStep]) -> Vec<String> {
        steps.iter().map(|s| s.step.to_string()).collect()
    }

    #[test]
    fn minimal_plan_has_no_overlays() {
        let steps = plan(
            &descriptor(AuthProvider::None, UiLibrary::None, false),
            ProvisionOptions::default(),
        );
        assert_eq!(
            step_names(&steps),
            vec![
                "validate-name",
                "resolve-templates",
                "compose-base",
                "merge-manifest",
                "synthesize-env",
                "install-dependencies",
                "init-version-control",
            ]
        );
        assert!(steps.iter().all(|s| s.enabled));
    }

    #[test]
    fn overlays_sit_between_base_and_merge() {
        let steps = plan(
            &descriptor(AuthProvider::Supabase, UiLibrary::Mui, true),
            ProvisionOptions::default(),
        );
        let names = step_names(&steps);
        assert_eq!(
            &names[2..6],
            &[
                "compose-base",
                "compose-overlay(storybook)",
                "compose-overlay(supabase)",
                "compose-overlay(ui-mui)",
            ]
        );
    }

    #[test]
    fn options_disable_external_steps() {
        let steps = plan(
            &descriptor(AuthProvider::None, UiLibrary::None, false),
            ProvisionOptions {
                install: false,
                init_git: false,
            },
        );
        let disabled: Vec<_> = steps
            .iter()
            .filter(|s| !s.enabled)
            .map(|s| s.step.clone())
            .collect();
        assert_eq!(
            disabled,
            vec![
                ProvisionStep::InstallDependencies,
                ProvisionStep::InitVersionControl
            ]
        );
    }

    #[test]
    fn only_version_control_is_non_fatal() {
        assert!(ProvisionStep::InstallDependencies.is_fatal_on_failure());
        assert!(!ProvisionStep::InitVersionControl.is_fatal_on_failure());
    }
}
