//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies `DIAGD_BIND` and `DIAGD_LOG_LEVEL` env overrides.
//!
//! # Module layout
//!
//! - **types** — Public configuration structs (`Config`, `HttpConfig`, …).
//! - **raw** — Raw TOML deserialization types (`RawConfig`, …). These mirror
//!   the file shape and use serde defaults; kept private.
//! - **load** — Loading logic: `merge_toml`, `load_raw_merged`, `load`,
//!   `load_from`, `expand_home`.

mod load;
mod raw;
mod types;

pub use load::{expand_home, load, load_from};
pub use types::*;

#[cfg(test)]
impl Config {
    /// Safe `Config` for unit tests — loopback bind, no log file, defaults
    /// everywhere else.
    pub fn test_default() -> Self {
        Self {
            service: ServiceConfig {
                name: "diagd-test".into(),
                log_level: "info".into(),
                log_file: None,
            },
            http: HttpConfig {
                bind: "127.0.0.1:0".into(),
            },
            vendor: VendorConfig { manifest: None },
            report: ReportConfig {
                escalate: vec!["warning".into(), "error".into()],
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    const MINIMAL_TOML: &str = r#"
[service]
name = "probe"
log_level = "info"
"#;

    fn write_toml(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn parse_basic_config() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.service.name, "probe");
        assert_eq!(cfg.service.log_level, "info");
        assert_eq!(cfg.http.bind, "127.0.0.1:8080");
    }

    #[test]
    fn empty_file_uses_defaults() {
        let f = write_toml("");
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.service.name, "diagd");
        assert_eq!(cfg.report.escalate, vec!["warning", "error"]);
        assert!(cfg.vendor.manifest.is_none());
    }

    #[test]
    fn tilde_expands_to_home() {
        let home = dirs::home_dir().expect("home dir must exist in test env");
        let expanded = expand_home("~/.diagd");
        assert!(expanded.starts_with(&home));
        assert!(expanded.ends_with(".diagd"));
    }

    #[test]
    fn absolute_path_unchanged() {
        let p = expand_home("/absolute/path");
        assert_eq!(p, std::path::PathBuf::from("/absolute/path"));
    }

    #[test]
    fn relative_path_unchanged() {
        let p = expand_home("relative/path");
        assert_eq!(p, std::path::PathBuf::from("relative/path"));
    }

    #[test]
    fn manifest_override_parsed() {
        let toml = r#"
[vendor]
manifest = "/opt/app/vendor/manifest.toml"
"#;
        let f = write_toml(toml);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(
            cfg.vendor.manifest.as_deref(),
            Some(std::path::Path::new("/opt/app/vendor/manifest.toml"))
        );
    }

    #[test]
    fn escalate_list_parsed() {
        let toml = r#"
[report]
escalate = ["error"]
"#;
        let f = write_toml(toml);
        let cfg = load_from(f.path(), None, None).unwrap();
        assert_eq!(cfg.report.escalate, vec!["error"]);
    }

    #[test]
    fn missing_file_errors() {
        let result = load_from(std::path::Path::new("/nonexistent/config.toml"), None, None);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("cannot read"));
    }

    #[test]
    fn bind_override_wins() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), Some("0.0.0.0:9999"), None).unwrap();
        assert_eq!(cfg.http.bind, "0.0.0.0:9999");
    }

    #[test]
    fn log_level_override_wins() {
        let f = write_toml(MINIMAL_TOML);
        let cfg = load_from(f.path(), None, Some("debug")).unwrap();
        assert_eq!(cfg.service.log_level, "debug");
    }

    const BASE_TOML: &str = r#"
[service]
name = "base-probe"
log_level = "info"

[http]
bind = "127.0.0.1:8088"
"#;

    fn write_named(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let p = dir.path().join(name);
        std::fs::write(&p, content).unwrap();
        p
    }

    #[test]
    fn overlay_keeps_base_fields() {
        let dir = TempDir::new().unwrap();
        write_named(&dir, "base.toml", BASE_TOML);
        let overlay = r#"
[meta]
base = "base.toml"

[service]
log_level = "debug"
"#;
        let overlay_path = write_named(&dir, "overlay.toml", overlay);
        let cfg = load_from(&overlay_path, None, None).unwrap();
        assert_eq!(cfg.service.name, "base-probe");
        assert_eq!(cfg.service.log_level, "debug");
        assert_eq!(cfg.http.bind, "127.0.0.1:8088");
    }

    #[test]
    fn chained_bases() {
        let dir = TempDir::new().unwrap();
        write_named(&dir, "grandbase.toml", BASE_TOML);
        let middle = r#"
[meta]
base = "grandbase.toml"

[service]
name = "middle-probe"
"#;
        write_named(&dir, "middle.toml", middle);
        let top = r#"
[meta]
base = "middle.toml"

[service]
log_level = "warn"
"#;
        let top_path = write_named(&dir, "top.toml", top);
        let cfg = load_from(&top_path, None, None).unwrap();
        assert_eq!(cfg.service.name, "middle-probe");
        assert_eq!(cfg.service.log_level, "warn");
    }

    #[test]
    fn missing_base_errors() {
        let dir = TempDir::new().unwrap();
        let overlay = r#"
[meta]
base = "nonexistent.toml"
"#;
        let overlay_path = write_named(&dir, "overlay.toml", overlay);
        let result = load_from(&overlay_path, None, None);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("cannot read"));
    }

    #[test]
    fn cycle_detection() {
        let dir = TempDir::new().unwrap();
        let self_path = dir.path().join("self.toml");
        let content = format!(
            "[meta]\nbase = \"{}\"\n\n{BASE_TOML}",
            self_path.display()
        );
        std::fs::write(&self_path, content).unwrap();
        let result = load_from(&self_path, None, None);
        assert!(result.is_err());
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("circular"));
    }
}
