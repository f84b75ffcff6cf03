//! Interactive prompts for `strata new`.
//!
//! Only compiled with the `interactive` feature. Each prompt starts on the
//! configured default, so pressing Enter through every question matches `-y`.

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use strata_core::domain::{AuthProvider, PackageManager, UiLibrary, validate_project_name};

use crate::error::{CliError, CliResult};

pub fn project_name() -> CliResult<String> {
    Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Project name")
        .validate_with(|input: &String| -> Result<(), String> {
            validate_project_name(input).map_err(|rule| rule.reason().to_string())
        })
        .interact_text()
        .map_err(prompt_error)
}

pub fn package_manager(default: PackageManager) -> CliResult<PackageManager> {
    select("Package manager", &PackageManager::ALL, default, |pm| {
        pm.as_str().to_string()
    })
}

pub fn provider(default: AuthProvider) -> CliResult<AuthProvider> {
    select("Auth provider", &AuthProvider::ALL, default, |p| {
        p.label().to_string()
    })
}

pub fn ui(default: UiLibrary) -> CliResult<UiLibrary> {
    select("UI library", &UiLibrary::ALL, default, |ui| ui.label().to_string())
}

pub fn storybook(default: bool) -> CliResult<bool> {
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Add Storybook?")
        .default(default)
        .interact()
        .map_err(prompt_error)
}

fn select<T: Copy + PartialEq>(
    prompt: &str,
    all: &[T],
    default: T,
    label: impl Fn(&T) -> String,
) -> CliResult<T> {
    let items: Vec<String> = all.iter().map(label).collect();
    let default_index = all.iter().position(|v| *v == default).unwrap_or(0);

    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .items(&items)
        .default(default_index)
        .interact_opt()
        .map_err(prompt_error)?
        .ok_or(CliError::Cancelled)?;

    Ok(all[index])
}

fn prompt_error(err: dialoguer::Error) -> CliError {
    CliError::IoError {
        message: "Prompt failed".into(),
        source: std::io::Error::other(err),
    }
}
