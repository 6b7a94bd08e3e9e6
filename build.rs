use std::env;
use std::process::Command;

fn run_trimmed(cmd: &str, args: &[&str]) -> String {
    Command::new(cmd)
        .args(args)
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn main() {
    let git_hash = run_trimmed("git", &["rev-parse", "--short", "HEAD"]);
    let rustc_version = run_trimmed("rustc", &["--version"]);
    let build_time = chrono::Utc::now().to_rfc3339();
    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_string());

    println!("cargo:rustc-env=DIAGD_GIT_HASH={git_hash}");
    println!("cargo:rustc-env=DIAGD_RUSTC_VERSION={rustc_version}");
    println!("cargo:rustc-env=DIAGD_BUILD_TIME_UTC={build_time}");
    println!("cargo:rustc-env=DIAGD_BUILD_PROFILE={profile}");

    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=build.rs");
}
