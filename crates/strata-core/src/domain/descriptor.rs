//! The immutable description of one project to provision.

use std::fmt;

use serde::Serialize;

use crate::domain::{
    error::DomainError,
    layer::{STORYBOOK_OVERLAY, TemplateLayer},
    project_name::ProjectName,
    value_objects::{AuthProvider, PackageManager, UiLibrary},
};

/// Everything the orchestrator needs to know about the project to create.
///
/// Built once per run through [`ProjectDescriptor::builder`]; there are no
/// setters afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectDescriptor {
    name: ProjectName,
    package_manager: PackageManager,
    provider: AuthProvider,
    ui: UiLibrary,
    storybook: bool,
    template_tag: Option<String>,
}

impl ProjectDescriptor {
    pub fn builder() -> ProjectDescriptorBuilder {
        ProjectDescriptorBuilder::default()
    }

    pub fn name(&self) -> &ProjectName {
        &self.name
    }

    pub fn package_manager(&self) -> PackageManager {
        self.package_manager
    }

    pub fn provider(&self) -> AuthProvider {
        self.provider
    }

    pub fn ui(&self) -> UiLibrary {
        self.ui
    }

    pub fn storybook(&self) -> bool {
        self.storybook
    }

    pub fn template_tag(&self) -> Option<&str> {
        self.template_tag.as_deref()
    }

    /// Overlays to apply, in precedence order: storybook, auth provider, UI library.
    ///
    /// Selections that need no overlay are left out entirely.
    pub fn overlays(&self) -> Vec<TemplateLayer> {
        let storybook = self.storybook.then(|| STORYBOOK_OVERLAY.to_string());
        [storybook, self.provider.overlay(), self.ui.overlay()]
            .into_iter()
            .flatten()
            .map(TemplateLayer::Overlay)
            .collect()
    }
}

impl fmt::Display for ProjectDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (pm: {}, provider: {}, ui: {}, storybook: {})",
            self.name, self.package_manager, self.provider, self.ui, self.storybook
        )
    }
}

/// Builder for [`ProjectDescriptor`]. Only the name is required.
#[derive(Debug, Default)]
pub struct ProjectDescriptorBuilder {
    name: Option<ProjectName>,
    package_manager: PackageManager,
    provider: AuthProvider,
    ui: UiLibrary,
    storybook: bool,
    template_tag: Option<String>,
}

impl ProjectDescriptorBuilder {
    /// Validate and set the project name.
    pub fn name(mut self, name: impl Into<String>) -> Result<Self, DomainError> {
        self.name = Some(ProjectName::parse(name)?);
        Ok(self)
    }

    pub fn package_manager(mut self, pm: PackageManager) -> Self {
        self.package_manager = pm;
        self
    }

    pub fn provider(mut self, provider: AuthProvider) -> Self {
        self.provider = provider;
        self
    }

    pub fn ui(mut self, ui: UiLibrary) -> Self {
        self.ui = ui;
        self
    }

    pub fn storybook(mut self, storybook: bool) -> Self {
        self.storybook = storybook;
        self
    }

    /// Pin a template release. Blank tags mean "latest".
    pub fn template_tag(mut self, tag: Option<String>) -> Self {
        self.template_tag = tag.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn build(self) -> Result<ProjectDescriptor, DomainError> {
        let name = self
            .name
            .ok_or(DomainError::MissingRequiredField { field: "name" })?;

        Ok(ProjectDescriptor {
            name,
            package_manager: self.package_manager,
            provider: self.provider,
            ui: self.ui,
            storybook: self.storybook,
            template_tag: self.template_tag,
        })
    }
}
