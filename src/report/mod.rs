//! Diagnostic report — model and collection pipeline.
//!
//! A [`Report`] is an ordered list of [`Section`]s of key/value rows, plus
//! the conditions that passed through without escalating. [`collect`] runs
//! every probe under the given [`EscalationPolicy`]; the first escalated
//! condition aborts collection and surfaces to the caller's boundary.
//!
//! # Module layout
//!
//! - **conditions** — `Severity`, `Condition`, `EscalationPolicy`, `Collector`.
//! - **probes** — one gathering function per section; kept private.
//! - **render** — HTML page rendering.

pub mod conditions;
mod probes;
pub mod render;

use chrono::{DateTime, Utc};

use crate::config::Config;
use crate::vendor::VendorManifest;

pub use conditions::{Collector, Condition, EscalatedCondition, EscalationPolicy, Severity};

// ── Model ────────────────────────────────────────────────────────────────────

/// One titled block of key/value rows.
#[derive(Debug, Clone)]
pub struct Section {
    pub title: &'static str,
    pub rows: Vec<(String, String)>,
}

impl Section {
    pub fn new(title: &'static str) -> Self {
        Self {
            title,
            rows: Vec::new(),
        }
    }

    pub fn row(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.rows.push((key.into(), value.into()));
    }
}

/// A fully collected diagnostic report, ready for rendering.
#[derive(Debug, Clone)]
pub struct Report {
    pub service_name: String,
    pub version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub sections: Vec<Section>,
    /// Conditions that passed through the policy unconverted.
    pub conditions: Vec<Condition>,
}

// ── Collection ───────────────────────────────────────────────────────────────

/// Run every probe and assemble the report.
///
/// Read-only with respect to the filesystem; the only side effects are log
/// lines for passed-through conditions.
pub fn collect(
    config: &Config,
    manifest: &VendorManifest,
    policy: &EscalationPolicy,
) -> Result<Report, EscalatedCondition> {
    let mut collector = Collector::new(policy.clone());

    let sections = vec![
        probes::runtime(),
        probes::build(),
        probes::process(&mut collector)?,
        probes::environment(&mut collector)?,
        probes::configuration(config),
        probes::dependencies(manifest, &mut collector)?,
    ];

    Ok(Report {
        service_name: config.service.name.clone(),
        version: env!("CARGO_PKG_VERSION"),
        generated_at: Utc::now(),
        sections,
        conditions: collector.into_conditions(),
    })
}
