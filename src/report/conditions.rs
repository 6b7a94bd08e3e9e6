//! Runtime conditions and the escalation policy.
//!
//! Probes raise a [`Condition`] when they hit an anomaly while gathering
//! data. The [`EscalationPolicy`] decides which severities become hard
//! failures: an escalated condition aborts collection, everything else is
//! logged and recorded in the report, and collection continues.
//!
//! The policy is an explicit value held in server state and handed to the
//! [`Collector`] per request — tests construct their own policies instead of
//! poking process globals.

use std::collections::HashSet;
use std::fmt;

use thiserror::Error;
use tracing::{debug, warn};

// ── Severity ─────────────────────────────────────────────────────────────────

/// Severity of a runtime condition raised during report collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Notice,
    Deprecated,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Notice => "notice",
            Severity::Deprecated => "deprecated",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }

    pub fn parse(s: &str) -> Option<Severity> {
        match s {
            "notice" => Some(Severity::Notice),
            "deprecated" => Some(Severity::Deprecated),
            "warning" => Some(Severity::Warning),
            "error" => Some(Severity::Error),
            _ => None,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Condition ────────────────────────────────────────────────────────────────

/// A runtime anomaly observed by a probe: severity, originating probe, and a
/// human-readable message.
#[derive(Debug, Clone)]
pub struct Condition {
    pub severity: Severity,
    /// Probe that raised the condition (`"environment"`, `"vendor"`, …).
    pub source: &'static str,
    pub message: String,
}

impl Condition {
    pub fn new(severity: Severity, source: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity,
            source,
            message: message.into(),
        }
    }

    pub fn notice(source: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Notice, source, message)
    }

    pub fn warning(source: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, source, message)
    }

    pub fn error(source: &'static str, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, source, message)
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} from {}: {}", self.severity, self.source, self.message)
    }
}

/// A condition whose severity the active policy converts into a failure.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EscalatedCondition(pub Condition);

// ── EscalationPolicy ─────────────────────────────────────────────────────────

/// The set of severities converted into failures. Severities outside the set
/// pass through unconverted.
#[derive(Debug, Clone)]
pub struct EscalationPolicy {
    escalated: HashSet<Severity>,
}

impl EscalationPolicy {
    /// The standard policy: warnings and errors escalate, notices and
    /// deprecations pass through.
    pub fn standard() -> Self {
        Self {
            escalated: HashSet::from([Severity::Warning, Severity::Error]),
        }
    }

    /// Policy escalating exactly the given severities.
    pub fn only(severities: impl IntoIterator<Item = Severity>) -> Self {
        Self {
            escalated: severities.into_iter().collect(),
        }
    }

    /// Build a policy from config strings, rejecting unknown names.
    pub fn from_names(names: &[String]) -> Result<Self, String> {
        let mut escalated = HashSet::new();
        for name in names {
            let severity = Severity::parse(name)
                .ok_or_else(|| format!("unknown condition severity in [report] escalate: '{name}'"))?;
            escalated.insert(severity);
        }
        Ok(Self { escalated })
    }

    pub fn escalates(&self, severity: Severity) -> bool {
        self.escalated.contains(&severity)
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

// ── Collector ────────────────────────────────────────────────────────────────

/// Per-request condition sink. Escalated conditions abort collection via the
/// `?` operator; the rest accumulate for the report's Conditions section.
pub struct Collector {
    policy: EscalationPolicy,
    passed: Vec<Condition>,
}

impl Collector {
    pub fn new(policy: EscalationPolicy) -> Self {
        Self {
            policy,
            passed: Vec::new(),
        }
    }

    /// Raise a condition. Returns `Err` when the policy escalates its
    /// severity; otherwise the condition is logged, recorded, and collection
    /// continues.
    pub fn raise(&mut self, condition: Condition) -> Result<(), EscalatedCondition> {
        if self.policy.escalates(condition.severity) {
            return Err(EscalatedCondition(condition));
        }
        match condition.severity {
            Severity::Notice | Severity::Deprecated => {
                debug!(source = condition.source, "{}", condition.message);
            }
            Severity::Warning | Severity::Error => {
                warn!(source = condition.source, "{}", condition.message);
            }
        }
        self.passed.push(condition);
        Ok(())
    }

    /// Conditions that passed through without escalating.
    pub fn into_conditions(self) -> Vec<Condition> {
        self.passed
    }
}
