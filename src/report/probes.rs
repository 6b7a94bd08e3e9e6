//! Probes — one function per report section.
//!
//! Each probe gathers one slice of runtime state into a [`Section`]. Probes
//! that touch fallible state take the [`Collector`] and raise conditions
//! instead of failing outright; whether a condition aborts the report is the
//! policy's call, not the probe's.

use crate::config::Config;
use crate::vendor::VendorManifest;

use super::conditions::{Collector, Condition, EscalatedCondition};
use super::Section;

/// Package, host triple, and standard library facts.
pub(super) fn runtime() -> Section {
    let mut s = Section::new("Runtime");
    s.row("package", env!("CARGO_PKG_NAME"));
    s.row("version", env!("CARGO_PKG_VERSION"));
    s.row("os", std::env::consts::OS);
    s.row("arch", std::env::consts::ARCH);
    s.row("family", std::env::consts::FAMILY);
    s
}

/// Build metadata emitted by `build.rs`.
pub(super) fn build() -> Section {
    let mut s = Section::new("Build");
    s.row("git commit", env!("DIAGD_GIT_HASH"));
    s.row("rustc", env!("DIAGD_RUSTC_VERSION"));
    s.row("built at", env!("DIAGD_BUILD_TIME_UTC"));
    s.row("profile", env!("DIAGD_BUILD_PROFILE"));
    s
}

/// Process identity: pid, binary path, working directory, arguments.
pub(super) fn process(collector: &mut Collector) -> Result<Section, EscalatedCondition> {
    let mut s = Section::new("Process");
    s.row("pid", std::process::id().to_string());

    match std::env::current_exe() {
        Ok(exe) => s.row("binary", exe.display().to_string()),
        Err(e) => collector.raise(Condition::warning(
            "process",
            format!("cannot resolve entry binary path: {e}"),
        ))?,
    }

    match std::env::current_dir() {
        Ok(cwd) => s.row("working directory", cwd.display().to_string()),
        Err(e) => collector.raise(Condition::warning(
            "process",
            format!("cannot resolve working directory: {e}"),
        ))?,
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    s.row(
        "arguments",
        if args.is_empty() {
            "(none)".to_string()
        } else {
            args.join(" ")
        },
    );
    Ok(s)
}

/// Full environment dump, sorted by name. Variables that are not valid UTF-8
/// raise a warning-severity condition — under the standard policy that is a
/// request failure, matching the escalation contract.
pub(super) fn environment(collector: &mut Collector) -> Result<Section, EscalatedCondition> {
    let mut s = Section::new("Environment");
    let mut rows = Vec::new();
    for (key, value) in std::env::vars_os() {
        match (key.to_str(), value.to_str()) {
            (Some(k), Some(v)) => rows.push((k.to_string(), v.to_string())),
            _ => collector.raise(Condition::warning(
                "environment",
                format!("environment variable {:?} is not valid UTF-8", key),
            ))?,
        }
    }
    rows.sort();
    s.rows = rows;
    Ok(s)
}

/// Effective configuration values.
pub(super) fn configuration(config: &Config) -> Section {
    let mut s = Section::new("Configuration");
    s.row("service name", config.service.name.as_str());
    s.row("log level", config.service.log_level.as_str());
    s.row(
        "log file",
        config
            .service
            .log_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(stderr)".to_string()),
    );
    s.row("bind", config.http.bind.as_str());
    s.row("escalated severities", config.report.escalate.join(", "));
    s
}

/// Dependency inventory from the vendor manifest. Entries with an empty name
/// or version are malformed generator output and raise warnings.
pub(super) fn dependencies(
    manifest: &VendorManifest,
    collector: &mut Collector,
) -> Result<Section, EscalatedCondition> {
    let mut s = Section::new("Dependencies");

    match &manifest.generated_by {
        Some(tool) => s.row("generated by", tool.as_str()),
        None => collector.raise(Condition::notice(
            "vendor",
            "manifest does not record its generator",
        ))?,
    }
    if let Some(at) = &manifest.generated_at {
        s.row("generated at", at.as_str());
    }
    s.row("packages", manifest.packages.len().to_string());

    for (idx, pkg) in manifest.packages.iter().enumerate() {
        if pkg.name.trim().is_empty() {
            collector.raise(Condition::warning(
                "vendor",
                format!("package entry {idx} has an empty name"),
            ))?;
            continue;
        }
        if pkg.version.trim().is_empty() {
            collector.raise(Condition::warning(
                "vendor",
                format!("package `{}` has an empty version", pkg.name),
            ))?;
            continue;
        }
        let detail = match &pkg.checksum {
            Some(sum) => format!("{} ({sum})", pkg.version),
            None => pkg.version.clone(),
        };
        s.row(pkg.name.as_str(), detail);
    }
    Ok(s)
}
