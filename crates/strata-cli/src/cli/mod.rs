//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! and help text. Option values are parsed with the domain's own `FromStr`
//! impls, so the accepted spellings live in one place.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use strata_core::domain::{AuthProvider, PackageManager, UiLibrary};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "strata",
    bin_name = "strata",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Compose a Next.js project from a base template and overlays",
    long_about = "strata fetches a release of the starter templates, copies the \
                  base layer plus the overlays you pick, merges their package.json \
                  fragments, and installs dependencies.",
    after_help = "EXAMPLES:\n\
        \x20 strata new my-app\n\
        \x20 strata new my-app --provider clerk --ui shadcn --storybook -y\n\
        \x20 strata new my-app --templates-dir ./templates --no-install\n\
        \x20 strata completions bash > /usr/share/bash-completion/completions/strata",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new project.
    #[command(
        visible_alias = "n",
        about = "Create a new project",
        after_help = "EXAMPLES:\n\
            \x20 strata new my-app --pm npm --provider authjs\n\
            \x20 strata new my-app --ui mui --storybook --template-tag v1.4.0 -y\n\
            \x20 strata new my-app --dry-run"
    )]
    New(NewArgs),

    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 strata init\n\
            \x20 strata init --force\n\
            \x20 strata -c ./strata.toml init"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 strata completions bash > ~/.local/share/bash-completion/completions/strata\n\
            \x20 strata completions zsh  > ~/.zfunc/_strata\n\
            \x20 strata completions fish > ~/.config/fish/completions/strata.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 strata config get defaults.package_manager\n\
            \x20 strata config list\n\
            \x20 strata config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `strata new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project directory name, created under the current directory.
    #[arg(value_name = "NAME", help = "Project name (prompted for when omitted)")]
    pub name: Option<String>,

    #[arg(
        long = "pm",
        value_name = "PM",
        help = "Package manager: pnpm, npm, yarn, bun"
    )]
    pub package_manager: Option<PackageManager>,

    #[arg(
        long = "provider",
        value_name = "PROVIDER",
        help = "Auth provider: none, authjs, clerk, auth0, supabase, msal"
    )]
    pub provider: Option<AuthProvider>,

    #[arg(
        long = "ui",
        value_name = "UI",
        help = "UI library: none, headless, shadcn, mui, chakra, mantine"
    )]
    pub ui: Option<UiLibrary>,

    #[arg(long = "storybook", help = "Add the Storybook overlay")]
    pub storybook: bool,

    /// Overrides `defaults.storybook = true` from the config file.
    #[arg(
        long = "no-storybook",
        conflicts_with = "storybook",
        help = "Leave out the Storybook overlay"
    )]
    pub no_storybook: bool,

    /// Pin a template release instead of using the latest tag.
    #[arg(long = "template-tag", value_name = "TAG", help = "Template release tag")]
    pub template_tag: Option<String>,

    /// Skip prompts and use defaults for anything not given as a flag,
    /// including the name (`my-app`).
    #[arg(short = 'y', long = "yes", help = "Skip prompts and use defaults")]
    pub yes: bool,

    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        help = "Use a local template bundle instead of the git repository"
    )]
    pub templates_dir: Option<PathBuf>,

    #[arg(
        long = "cache-dir",
        value_name = "DIR",
        help = "Where fetched template releases are kept"
    )]
    pub cache_dir: Option<PathBuf>,

    #[arg(long = "no-install", help = "Skip dependency installation")]
    pub no_install: bool,

    #[arg(long = "no-git", help = "Skip git repository initialization")]
    pub no_git: bool,

    /// Print the run plan without touching the filesystem.
    #[arg(long = "dry-run", help = "Show what would run without running it")]
    pub dry_run: bool,
}

impl NewArgs {
    /// `Some` when `--storybook` or `--no-storybook` was given.
    pub fn storybook_choice(&self) -> Option<bool> {
        match (self.storybook, self.no_storybook) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `strata init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `strata completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `strata config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `defaults.provider`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse_new(args: &[&str]) -> NewArgs {
        let argv = ["strata", "new"].into_iter().chain(args.iter().copied());
        match Cli::parse_from(argv).command {
            Commands::New(args) => args,
            other => panic!("expected New command, got {other:?}"),
        }
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_new_with_all_options() {
        let args = parse_new(&[
            "my-app",
            "--pm",
            "bun",
            "--provider",
            "clerk",
            "--ui",
            "shadcn",
            "--storybook",
            "--template-tag",
            "v1.2.0",
            "-y",
        ]);
        assert_eq!(args.name.as_deref(), Some("my-app"));
        assert_eq!(args.package_manager, Some(PackageManager::Bun));
        assert_eq!(args.provider, Some(AuthProvider::Clerk));
        assert_eq!(args.ui, Some(UiLibrary::Shadcn));
        assert!(args.storybook);
        assert_eq!(args.template_tag.as_deref(), Some("v1.2.0"));
        assert!(args.yes);
    }

    #[test]
    fn option_values_are_case_insensitive() {
        let args = parse_new(&["my-app", "--pm", "NPM", "--ui", "Mui"]);
        assert_eq!(args.package_manager, Some(PackageManager::Npm));
        assert_eq!(args.ui, Some(UiLibrary::Mui));
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let result = Cli::try_parse_from(["strata", "new", "x", "--provider", "okta"]);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("okta"));
        assert!(err.contains("clerk"));
    }

    #[test]
    fn name_is_optional_for_prompting() {
        let args = parse_new(&[]);
        assert!(args.name.is_none());
        assert!(args.package_manager.is_none());
    }

    #[test]
    fn storybook_choice_is_tristate() {
        assert_eq!(parse_new(&["a"]).storybook_choice(), None);
        assert_eq!(parse_new(&["a", "--storybook"]).storybook_choice(), Some(true));
        assert_eq!(parse_new(&["a", "--no-storybook"]).storybook_choice(), Some(false));
        assert!(
            Cli::try_parse_from(["strata", "new", "a", "--storybook", "--no-storybook"]).is_err()
        );
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["strata", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
