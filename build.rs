//! Build script for chore-distributor
//!
//! Bakes the commit and build date printed by `chore-distributor version`.
//! Release tarballs have no `.git`, so packagers can pass the commit in
//! `CHORES_BUILD_COMMIT` instead.

use std::process::Command;

const COMMIT_OVERRIDE_VAR: &str = "CHORES_BUILD_COMMIT";

/// Trimmed stdout of a successful git invocation.
fn git_output(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8(output.stdout).ok()?;
    Some(text.trim().to_string()).filter(|s| !s.is_empty())
}

fn main() {
    let commit = std::env::var(COMMIT_OVERRIDE_VAR)
        .ok()
        .filter(|s| !s.trim().is_empty())
        .or_else(|| {
            let hash = git_output(&["rev-parse", "--short", "HEAD"])?;
            // Mark builds with uncommitted changes
            match git_output(&["status", "--porcelain", "--untracked-files=no"]) {
                Some(_) => Some(format!("{hash}-dirty")),
                None => Some(hash),
            }
        })
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GIT_COMMIT_SHORT={}", commit);

    let built = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
    println!("cargo:rustc-env=BUILD_TIMESTAMP={}", built);

    println!("cargo:rerun-if-env-changed={}", COMMIT_OVERRIDE_VAR);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
