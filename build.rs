use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs");

    let status = match run("git", &["status", "--porcelain"]) {
        Some(changes) if changes.is_empty() => "clean".to_string(),
        Some(_) => "dirty".to_string(),
        None => "unknown".to_string(),
    };

    let entries = [
        (
            "HASH",
            run("git", &["rev-parse", "--short", "HEAD"]).filter(|hash| !hash.is_empty()),
        ),
        ("STATUS", Some(status)),
        (
            "TIMESTAMP",
            Some(chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)),
        ),
        ("TARGET", env::var("TARGET").ok()),
        ("PROFILE", env::var("PROFILE").ok()),
        ("RUSTC", run("rustc", &["--version"])),
    ];

    for (key, value) in entries {
        let value = value.unwrap_or_else(|| "unknown".to_string());
        println!("cargo:rustc-env=TERMSHEET_BUILD_{key}={value}");
    }
}

/// Trimmed stdout of a successful command.
fn run(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|text| text.trim().to_string())
}
