//! Build script embedding version information for `promptdeck --version`.

use std::process::Command;

/// Packagers building from a tarball can pin the revision here.
const REVISION_OVERRIDE: &str = "PROMPTDECK_BUILD_REV";

fn git_revision() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short=10", "HEAD"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }
    let rev = String::from_utf8(output.stdout).ok()?;
    Some(rev.trim().to_owned()).filter(|r| !r.is_empty())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed={REVISION_OVERRIDE}");

    let revision = std::env::var(REVISION_OVERRIDE)
        .ok()
        .filter(|r| !r.is_empty())
        .or_else(git_revision)
        .unwrap_or_else(|| "unknown".to_owned());
    println!("cargo:rustc-env=GIT_HASH={revision}");

    let built = chrono::Utc::now().format("%Y-%m-%d");
    println!("cargo:rustc-env=BUILD_TIME={built}");

    let target = std::env::var("TARGET").unwrap_or_else(|_| "unknown".to_owned());
    println!("cargo:rustc-env=BUILD_TARGET={target}");
}
