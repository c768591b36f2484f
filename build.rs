use std::path::PathBuf;
use std::process::Command;

fn main() {
    let commit = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GIT_COMMIT_HASH={commit}");

    // Watch HEAD only inside a checkout.
    if let Some(git_dir) = git(&["rev-parse", "--git-dir"]) {
        let mut head = PathBuf::from(git_dir);
        if head.is_relative() {
            if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
                head = PathBuf::from(manifest_dir).join(head);
            }
        }
        println!("cargo:rerun-if-changed={}", head.join("HEAD").display());
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;

    if !output.status.success() {
        return None;
    }

    let out = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}
