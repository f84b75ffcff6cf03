//! Implementation of the `strata new` command.
//!
//! Responsibility: turn CLI arguments, config defaults and prompt answers
//! into a `ProjectDescriptor`, wire the adapters, run the provisioning
//! service, and display results. No business logic lives here.

use std::io::IsTerminal as _;
use std::path::Path;

use tracing::{debug, info, instrument};

use strata_adapters::{
    CommandInstaller, GitTemplateSource, GitVersionControl, LocalFilesystem, LocalTemplateSource,
};
use strata_core::{
    application::{
        ProvisionReport, ProvisionRequest, ProvisioningService, ports::TemplateSource,
    },
    domain::{
        AuthProvider, PackageManager, ProjectDescriptor, ProvisionOptions, UiLibrary, plan::plan,
    },
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
    progress::SpinnerReporter,
};

/// Everything the user chose, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    name: String,
    package_manager: PackageManager,
    provider: AuthProvider,
    ui: UiLibrary,
    storybook: bool,
}

/// Execute the `strata new` command.
///
/// Dispatch sequence:
/// 1. Resolve the selection from flags, prompts, and config defaults
/// 2. Build and validate the `ProjectDescriptor`
/// 3. Early-exit with the run plan if `--dry-run`
/// 4. Wire adapters and run `ProvisioningService`
/// 5. Print warnings and next-steps guidance
#[instrument(skip_all)]
pub fn execute(
    args: NewArgs,
    global: &GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    // 1. Selection
    let interactive = cfg!(feature = "interactive")
        && !args.yes
        && !global.quiet
        && !output.is_json()
        && std::io::stdin().is_terminal();
    let selection = if interactive {
        prompt_selection(&args, &config)?
    } else {
        resolve_selection(&args, &config)?
    };

    // 2. Descriptor
    let descriptor = ProjectDescriptor::builder()
        .name(selection.name)?
        .package_manager(selection.package_manager)
        .provider(selection.provider)
        .ui(selection.ui)
        .storybook(selection.storybook)
        .template_tag(args.template_tag.clone())
        .build()?;
    let options = ProvisionOptions {
        install: !args.no_install && config.provision.install,
        init_git: !args.no_git && config.provision.git,
    };
    debug!(descriptor = %descriptor, ?options, "Descriptor resolved");

    let workspace = std::env::current_dir().map_err(|e| CliError::IoError {
        message: "Failed to read the current directory".into(),
        source: e,
    })?;

    // 3. Dry run
    if args.dry_run {
        return show_plan(&descriptor, options, &workspace, &output);
    }

    // 4. Provision
    let cache_dir = args.cache_dir.clone().unwrap_or_else(|| config.cache_dir());
    let service = ProvisioningService::new(
        Box::new(LocalFilesystem::new()),
        template_source(&args, &config),
        Box::new(CommandInstaller::new()),
        Box::new(GitVersionControl::new()),
    );

    output.header(&format!("Creating '{}'...", descriptor.name()))?;
    let reporter = if output.is_quiet() || output.is_json() {
        SpinnerReporter::hidden()
    } else {
        SpinnerReporter::new(output.supports_color())
    };

    let result = service.provision(
        &ProvisionRequest {
            descriptor: &descriptor,
            workspace: &workspace,
            cache_dir: &cache_dir,
            options,
        },
        &reporter,
    );
    reporter.finish();
    let report = result?;

    info!(run_id = %report.run_id, path = %report.project_path.display(), "Project created");

    // 5. Summary
    print_summary(&descriptor, options, &report, &output)
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// Name used by `-y` when none is given.
const DEFAULT_PROJECT_NAME: &str = "my-app";

/// Flags first, then config defaults. Never prompts.
///
/// Without a name, `-y` falls back to [`DEFAULT_PROJECT_NAME`]; any other
/// non-interactive run has nothing to fall back on.
fn resolve_selection(args: &NewArgs, config: &AppConfig) -> CliResult<Selection> {
    let defaults = &config.defaults;
    let name = match (&args.name, args.yes) {
        (Some(name), _) => name.clone(),
        (None, true) => DEFAULT_PROJECT_NAME.to_string(),
        (None, false) => {
            return Err(CliError::MissingArgument {
                what: "project name",
                hint: "Pass the name as the first argument (strata new my-app), or -y for 'my-app'",
            });
        }
    };

    Ok(Selection {
        name,
        package_manager: args.package_manager.unwrap_or(defaults.package_manager),
        provider: args.provider.unwrap_or(defaults.provider),
        ui: args.ui.unwrap_or(defaults.ui),
        storybook: args.storybook_choice().unwrap_or(defaults.storybook),
    })
}

/// Flags first; anything missing is asked for, starting on the config default.
#[cfg(feature = "interactive")]
fn prompt_selection(args: &NewArgs, config: &AppConfig) -> CliResult<Selection> {
    use crate::prompt;

    let defaults = &config.defaults;
    Ok(Selection {
        name: match &args.name {
            Some(name) => name.clone(),
            None => prompt::project_name()?,
        },
        package_manager: match args.package_manager {
            Some(pm) => pm,
            None => prompt::package_manager(defaults.package_manager)?,
        },
        provider: match args.provider {
            Some(provider) => provider,
            None => prompt::provider(defaults.provider)?,
        },
        ui: match args.ui {
            Some(ui) => ui,
            None => prompt::ui(defaults.ui)?,
        },
        storybook: match args.storybook_choice() {
            Some(storybook) => storybook,
            None => prompt::storybook(defaults.storybook)?,
        },
    })
}

#[cfg(not(feature = "interactive"))]
fn prompt_selection(args: &NewArgs, config: &AppConfig) -> CliResult<Selection> {
    resolve_selection(args, config)
}

// ── Adapters ──────────────────────────────────────────────────────────────────

/// `--templates-dir`, then `templates.local_path`, then the git repository.
fn template_source(args: &NewArgs, config: &AppConfig) -> Box<dyn TemplateSource> {
    match args
        .templates_dir
        .clone()
        .or_else(|| config.templates.local_path.clone())
    {
        Some(dir) => {
            debug!(dir = %dir.display(), "Using local templates");
            Box::new(LocalTemplateSource::new(dir))
        }
        None => Box::new(GitTemplateSource::new(config.templates.repository.clone())),
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

fn show_plan(
    descriptor: &ProjectDescriptor,
    options: ProvisionOptions,
    workspace: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let steps = plan(descriptor, options);
    let project_path = workspace.join(descriptor.name().as_str());

    output.info(&format!(
        "Dry run: would create '{}' at {}",
        descriptor.name(),
        project_path.display(),
    ))?;
    for planned in &steps {
        let line = if planned.enabled {
            format!("  {}", planned.step.describe())
        } else {
            format!("  {} (skipped)", planned.step.describe())
        };
        output.print(&line)?;
    }

    output.json(&serde_json::json!({
        "dry_run": true,
        "project": descriptor,
        "path": project_path,
        "steps": steps
            .iter()
            .map(|p| serde_json::json!({ "step": p.step, "enabled": p.enabled }))
            .collect::<Vec<_>>(),
    }))?;
    Ok(())
}

fn print_summary(
    descriptor: &ProjectDescriptor,
    options: ProvisionOptions,
    report: &ProvisionReport,
    output: &OutputManager,
) -> CliResult<()> {
    for (step, reason) in report.warnings() {
        output.warning(&format!("{} did not complete: {reason}", step.describe()))?;
    }

    output.success(&format!(
        "Project '{}' created at {} (templates {})",
        descriptor.name(),
        report.project_path.display(),
        report.template_tag,
    ))?;
    output.json(report)?;

    let pm = descriptor.package_manager();
    output.print("")?;
    output.print("Next steps:")?;
    output.print(&format!("  cd {}", descriptor.name()))?;
    if !options.install {
        output.print(&format!("  {} install", pm.program()))?;
    }
    output.print("  # fill in .env.local")?;
    output.print(&format!("  {}", pm.run_script("dev")))?;

    if descriptor.provider() != AuthProvider::None
        && report.project_path.join("README.addon.md").exists()
    {
        output.info(&format!(
            "See README.addon.md to finish setting up {}",
            descriptor.provider().label()
        ))?;
    }
    Ok(())
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args(name: Option<&str>) -> NewArgs {
        NewArgs {
            name: name.map(String::from),
            package_manager: None,
            provider: None,
            ui: None,
            storybook: false,
            no_storybook: false,
            template_tag: None,
            yes: true,
            templates_dir: None,
            cache_dir: None,
            no_install: false,
            no_git: false,
            dry_run: false,
        }
    }

    #[test]
    fn defaults_come_from_config() {
        let mut config = AppConfig::default();
        config.defaults.package_manager = PackageManager::Yarn;
        config.defaults.storybook = true;

        let selection = resolve_selection(&args(Some("my-app")), &config).unwrap();

        assert_eq!(
            selection,
            Selection {
                name: "my-app".into(),
                package_manager: PackageManager::Yarn,
                provider: AuthProvider::Authjs,
                ui: UiLibrary::None,
                storybook: true,
            }
        );
    }

    #[test]
    fn flags_override_config() {
        let mut a = args(Some("my-app"));
        a.package_manager = Some(PackageManager::Npm);
        a.provider = Some(AuthProvider::None);
        a.ui = Some(UiLibrary::Chakra);

        let selection = resolve_selection(&a, &AppConfig::default()).unwrap();

        assert_eq!(selection.package_manager, PackageManager::Npm);
        assert_eq!(selection.provider, AuthProvider::None);
        assert_eq!(selection.ui, UiLibrary::Chakra);
    }

    #[test]
    fn yes_without_name_uses_default_name() {
        let selection = resolve_selection(&args(None), &AppConfig::default()).unwrap();
        assert_eq!(selection.name, "my-app");
    }

    #[test]
    fn no_storybook_overrides_config_default() {
        let mut config = AppConfig::default();
        config.defaults.storybook = true;
        let mut a = args(Some("my-app"));
        a.no_storybook = true;

        assert!(!resolve_selection(&a, &config).unwrap().storybook);
    }

    #[test]
    fn missing_name_without_yes_is_user_error() {
        let mut a = args(None);
        a.yes = false;
        let err = resolve_selection(&a, &AppConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::MissingArgument { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn templates_dir_flag_beats_config() {
        let mut a = args(Some("x"));
        a.templates_dir = Some(PathBuf::from("/flag"));
        let mut config = AppConfig::default();
        config.templates.local_path = Some(PathBuf::from("/config"));

        // Both are local; the flag must be the one used. Resolving the tag
        // of a missing directory surfaces its path in the error.
        let err = template_source(&a, &config)
            .resolve_latest_tag()
            .unwrap_err();
        assert!(err.to_string().contains("/flag"));
    }
}
