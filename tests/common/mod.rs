//! Shared test harness: isolated workspace plus a CLI runner that
//! captures output per labeled invocation.

#![allow(dead_code)]

use assert_cmd::Command;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Debug)]
pub struct IshuRun {
    pub stdout: String,
    pub stderr: String,
    pub status: std::process::ExitStatus,
}

impl IshuRun {
    pub fn assert_success(&self, label: &str) {
        assert!(
            self.status.success(),
            "{label} failed (status {:?})\nstdout:\n{}\nstderr:\n{}",
            self.status.code(),
            self.stdout,
            self.stderr
        );
    }

    pub fn assert_failure(&self, label: &str) {
        assert!(
            !self.status.success(),
            "{label} unexpectedly succeeded\nstdout:\n{}",
            self.stdout
        );
    }
}

/// Temp workspace. `HOME` points inside it so the config file is
/// isolated, and `ISHU_DIR` pins the tree root regardless of the
/// test process cwd.
pub struct IshuWorkspace {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl IshuWorkspace {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("temp dir");
        let root = temp_dir.path().to_path_buf();
        Self { temp_dir, root }
    }

    /// Create a workspace with the username already configured and the
    /// tree initialized.
    pub fn initialized(user: &str) -> Self {
        let workspace = Self::new();
        run_ishu(&workspace, ["conf", "--set", "user", user], "setup_conf")
            .assert_success("setup_conf");
        run_ishu(&workspace, ["init"], "setup_init").assert_success("setup_init");
        workspace
    }

    pub fn ishu_dir(&self) -> PathBuf {
        self.root.join(".ishu")
    }

    pub fn issue_path(&self, user: &str, num: u32) -> PathBuf {
        self.ishu_dir()
            .join(format!("user-{user}"))
            .join(format!("issue-{num}"))
            .join("issue")
    }

    pub fn registered_tags_path(&self) -> PathBuf {
        self.ishu_dir().join("registered_tags")
    }

    pub fn read_issue_json(&self, user: &str, num: u32) -> serde_json::Value {
        let raw = fs::read_to_string(self.issue_path(user, num)).expect("read issue doc");
        serde_json::from_str(&raw).expect("parse issue doc")
    }
}

pub fn run_ishu<I, S>(workspace: &IshuWorkspace, args: I, label: &str) -> IshuRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    run_ishu_with_stdin(workspace, args, "", label)
}

pub fn run_ishu_with_stdin<I, S>(
    workspace: &IshuWorkspace,
    args: I,
    stdin: &str,
    label: &str,
) -> IshuRun
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("ishu"));
    cmd.current_dir(&workspace.root);
    cmd.args(args);
    cmd.env("HOME", &workspace.root);
    cmd.env("ISHU_DIR", &workspace.root);
    cmd.env("RUST_LOG", "ishu=debug");
    cmd.write_stdin(stdin);

    let output = cmd.output().unwrap_or_else(|e| panic!("run ishu ({label}): {e}"));
    IshuRun {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        status: output.status,
    }
}
