use std::process::Command;

const GIT_VERSION_COMMANDS: &[&[&str]] = &[&["describe", "--tags", "--always", "--dirty"], &["rev-parse", "--short", "HEAD"]];

fn main() {
    let version = git_version().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());
    println!("cargo:rustc-env=DOCKSTEP_VERSION={}", version);
}

fn git_version() -> Option<String> {
    GIT_VERSION_COMMANDS.iter().find_map(|args| {
        let output = Command::new("git").args(*args).output().ok()?;
        if !output.status.success() {
            return None;
        }
        let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!version.is_empty()).then_some(version)
    })
}
