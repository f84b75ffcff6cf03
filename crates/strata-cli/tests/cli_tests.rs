//! End-to-end tests for the `strata` binary.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A scratch workspace with an empty config file and a local template bundle.
struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "").unwrap();

        let bundle = dir.path().join("templates");
        write(
            &bundle.join("base/package.json.partial"),
            r#"{"name": "{{PROJECT_NAME}}", "version": "0.1.0", "scripts": {"dev": "next dev"}}"#,
        );
        write(&bundle.join("base/env.example"), "NEXT_PUBLIC_APP_URL=\n");
        write(&bundle.join("base/src/app/page.tsx"), "export default 1;\n");
        write(
            &bundle.join("overlays/clerk/package.overlay.clerk.partial"),
            r#"{"dependencies": {"@clerk/nextjs": "6.0.0"}}"#,
        );
        write(&bundle.join("overlays/clerk/README.addon.md"), "Set CLERK_SECRET_KEY\n");

        fs::create_dir(dir.path().join("work")).unwrap();
        Self { dir }
    }

    fn work(&self) -> PathBuf {
        self.dir.path().join("work")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("strata").unwrap();
        cmd.current_dir(self.work())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("-c")
            .arg(self.dir.path().join("config.toml"));
        cmd
    }

    /// `strata new` with the local bundle and no external commands.
    fn new_project(&self, args: &[&str]) -> Command {
        let mut cmd = self.cmd();
        cmd.arg("new")
            .args(args)
            .arg("--templates-dir")
            .arg(self.dir.path().join("templates"))
            .arg("--cache-dir")
            .arg(self.dir.path().join("cache"))
            .args(["--no-install", "--no-git", "-y"]);
        cmd
    }
}

fn write(path: &Path, content: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

#[test]
fn help_lists_new_options() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["new", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--template-tag"))
        .stdout(predicate::str::contains("--provider"));
}

#[test]
fn invalid_name_is_user_error() {
    let sandbox = Sandbox::new();
    sandbox
        .new_project(&["My-App", "--provider", "none"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid project name"));

    assert!(!sandbox.work().join("My-App").exists());
}

#[test]
fn existing_directory_is_rejected() {
    let sandbox = Sandbox::new();
    fs::create_dir(sandbox.work().join("taken")).unwrap();

    sandbox
        .new_project(&["taken", "--provider", "none"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn creates_project_from_local_templates() {
    let sandbox = Sandbox::new();
    sandbox
        .new_project(&["my-app", "--provider", "clerk"])
        .assert()
        .success();

    let project = sandbox.work().join("my-app");
    let manifest = fs::read_to_string(project.join("package.json")).unwrap();
    assert!(manifest.contains(r#""name": "my-app""#));
    assert!(manifest.contains("@clerk/nextjs"));
    assert!(!project.join("package.json.partial").exists());
    assert!(!project.join("package.overlay.clerk.partial").exists());

    let env = fs::read_to_string(project.join(".env.local")).unwrap();
    assert!(env.starts_with("NEXT_PUBLIC_APP_URL="));
    assert!(env.contains("# clerk specific environment variables"));
}

#[test]
fn yes_without_name_uses_default_name() {
    let sandbox = Sandbox::new();
    sandbox.new_project(&["--provider", "none"]).assert().success();

    let manifest = fs::read_to_string(sandbox.work().join("my-app/package.json")).unwrap();
    assert!(manifest.contains(r#""name": "my-app""#));
}

#[test]
fn no_color_accepts_any_value() {
    let sandbox = Sandbox::new();
    for value in ["1", "true", "yes please", "0", ""] {
        sandbox
            .cmd()
            .env("NO_COLOR", value)
            .args(["config", "get", "defaults.ui"])
            .assert()
            .success()
            .stdout(predicate::str::diff("none\n"));
    }
}

#[test]
fn json_output_reports_steps() {
    let sandbox = Sandbox::new();
    let out = sandbox
        .new_project(&["json-app", "--provider", "none"])
        .arg("--output-format")
        .arg("json")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(report["template_tag"], "local");
    assert!(report["steps"].as_array().unwrap().len() >= 6);
}

#[test]
fn missing_overlay_is_not_found() {
    let sandbox = Sandbox::new();
    sandbox
        .new_project(&["ui-app", "--provider", "none", "--ui", "shadcn"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("ui-shadcn"));
}

#[test]
fn dry_run_touches_nothing() {
    let sandbox = Sandbox::new();
    sandbox
        .new_project(&["planned", "--provider", "clerk", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Applying overlay 'clerk'"))
        .stdout(predicate::str::contains("Installing dependencies (skipped)"));

    assert!(!sandbox.work().join("planned").exists());
}

#[test]
fn unknown_package_manager_is_rejected_by_parser() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["new", "app", "--pm", "cargo"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("pnpm"));
}

#[test]
fn config_get_prints_default() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["config", "get", "defaults.package_manager"])
        .assert()
        .success()
        .stdout(predicate::str::diff("pnpm\n"));
}

#[test]
fn config_reads_environment_overrides() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .env("STRATA_DEFAULTS__PROVIDER", "clerk")
        .args(["config", "get", "defaults.provider"])
        .assert()
        .success()
        .stdout(predicate::str::diff("clerk\n"));
}

#[test]
fn missing_config_file_is_configuration_error() {
    let sandbox = Sandbox::new();
    Command::cargo_bin("strata")
        .unwrap()
        .current_dir(sandbox.work())
        .arg("-c")
        .arg(sandbox.dir.path().join("absent.toml"))
        .args(["config", "list"])
        .assert()
        .code(4);
}

#[test]
fn init_creates_config_file() {
    let sandbox = Sandbox::new();
    let path = sandbox.dir.path().join("fresh.toml");

    Command::cargo_bin("strata")
        .unwrap()
        .current_dir(sandbox.work())
        .arg("-c")
        .arg(&path)
        .arg("init")
        .assert()
        .success();

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[defaults]"));
}

#[test]
fn completions_mention_binary() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("strata"));
}
