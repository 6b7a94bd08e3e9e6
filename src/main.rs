//! diagd — runtime diagnostics front controller entry point.
//!
//! Startup sequence:
//!   1. Load .env (if present)
//!   2. Parse CLI flags
//!   3. Load config
//!   4. Resolve effective log level (CLI `-v` flags > env > config)
//!   5. Init logger once
//!   6. Resolve the vendor manifest path and escalation policy
//!   7. Spawn Ctrl-C → shutdown signal watcher
//!   8. Serve until shutdown

use tokio_util::sync::CancellationToken;
use tracing::info;

use diagd::bootstrap::logger;
use diagd::config;
use diagd::error::AppError;
use diagd::report::EscalationPolicy;
use diagd::server::{self, ServerState};
use diagd::vendor;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), AppError> {
    // Load .env if present — ignore errors (file is optional).
    let _ = dotenvy::dotenv();

    let args = parse_cli_args();

    let config = config::load(args.config_path.as_deref())?;

    let effective_log_level = args.log_level.unwrap_or(config.service.log_level.as_str());
    let force_cli_level = args.log_level.is_some();

    logger::init(
        effective_log_level,
        force_cli_level,
        config.service.log_file.as_deref(),
    )?;

    let policy =
        EscalationPolicy::from_names(&config.report.escalate).map_err(AppError::Config)?;

    // Computed once; the request pipeline re-reads the file but never the path.
    let manifest_path = match &config.vendor.manifest {
        Some(path) => path.clone(),
        None => vendor::default_manifest_path()?,
    };

    info!(
        service = %config.service.name,
        bind = %config.http.bind,
        manifest = %manifest_path.display(),
        configured_log_level = %config.service.log_level,
        effective_log_level = %effective_log_level,
        "config loaded"
    );

    // Shared shutdown token — Ctrl-C cancels it, the server watches it.
    let shutdown = CancellationToken::new();
    let ctrlc_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("ctrl-c received — initiating shutdown");
            ctrlc_token.cancel();
        }
    });

    print_startup_summary(&config, &manifest_path);

    server::run(ServerState::new(config, manifest_path, policy), shutdown).await
}

fn print_startup_summary(config: &config::Config, manifest_path: &std::path::Path) {
    let pid = std::process::id();

    let fit = |text: String| -> String {
        const WIDTH: usize = 54;
        let char_count = text.chars().count();
        if char_count >= WIDTH {
            let mut out = text.chars().take(WIDTH - 1).collect::<String>();
            out.push('…');
            out
        } else {
            format!("{text:<WIDTH$}")
        }
    };

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║ 🔎 Diagd Front Controller                                ║");
    println!("╟──────────────────────────────────────────────────────────╢");
    println!("║ 🧾 {}║", fit(format!("service: {}", config.service.name)));
    println!("║ 🧠 {}║", fit(format!("pid: {pid}")));
    println!("║ 🌐 {}║", fit(format!("bind: {}", config.http.bind)));
    println!("║ 📦 {}║", fit(format!("manifest: {}", manifest_path.display())));
    println!(
        "║ ⚠️  {}║",
        fit(format!("escalate: {}", config.report.escalate.join(", ")))
    );
    println!("╚══════════════════════════════════════════════════════════╝");
}

// Basic flag parsing, no clap — the surface is three flags.
struct CliArgs {
    log_level: Option<&'static str>,
    config_path: Option<String>,
}

fn parse_cli_args() -> CliArgs {
    let mut verbosity = 0u8;
    let mut config_path = None;

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        if arg == "--" {
            break;
        }

        match arg.as_str() {
            "-h" | "--help" => {
                println!("Usage: diagd [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -h, --help                 Print help");
                println!("  -f, --config <PATH>        Path to configuration file (default: config/default.toml)");
                println!("  -v, -vv, -vvv, -vvvv       Increase logging verbosity");
                std::process::exit(0);
            }
            "-f" | "--config" => {
                if let Some(path) = iter.next() {
                    config_path = Some(path);
                } else {
                    eprintln!("error: -f/--config requires a path argument");
                    std::process::exit(1);
                }
            }
            "--verbose" => verbosity = verbosity.saturating_add(1),
            a if a.starts_with('-') && a.len() > 1 && a.chars().skip(1).all(|c| c == 'v') => {
                verbosity = verbosity.saturating_add((a.len() - 1) as u8);
            }
            _ => {}
        }
    }

    // Each -v raises verbosity one tier from the config default:
    //   -v      → warn   (suppress info noise, show warnings+errors only)
    //   -vv     → info   (normal operational output — the typical default)
    //   -vvv    → debug  (flow-level diagnostics: probe chatter)
    //   -vvvv+  → trace  (very verbose)
    let log_level = match verbosity {
        0 => None,
        1 => Some("warn"),
        2 => Some("info"),
        3 => Some("debug"),
        _ => Some("trace"),
    };

    CliArgs { log_level, config_path }
}
