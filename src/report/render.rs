//! HTML rendering for the diagnostic report.
//!
//! One self-contained page, no external assets — the styling lives in a
//! `const` the same way the channel welcome pages do elsewhere in this
//! family of services.

use super::{Report, Section};

const PAGE_CSS: &str = r#"
    *, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: system-ui, -apple-system, sans-serif;
      background: #0f0f0f; color: #e0e0e0;
      padding: 2rem; max-width: 64rem; margin: 0 auto;
    }
    header { margin-bottom: 2rem; }
    h1 { font-size: 1.5rem; }
    header p { font-size: 0.85rem; color: #888; margin-top: 0.25rem; }
    section {
      margin-bottom: 1.5rem; padding: 1rem 1.5rem;
      border: 1px solid #333; border-radius: 12px;
      background: #1a1a1a;
    }
    h2 { font-size: 1rem; margin-bottom: 0.75rem; color: #c0c0e0; }
    table { width: 100%; border-collapse: collapse; font-size: 0.85rem; }
    td { padding: 0.3rem 0.5rem; vertical-align: top; }
    td:first-child { width: 30%; color: #888; }
    tr:nth-child(odd) { background: #202020; }
    .severity { color: #e0b060; }
"#;

/// Render the full report page.
pub fn page(report: &Report) -> String {
    let mut out = String::with_capacity(16 * 1024);
    out.push_str("<!doctype html>\n<html lang=\"en\">\n<head>\n");
    out.push_str("  <meta charset=\"utf-8\" />\n");
    out.push_str("  <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n");
    out.push_str(&format!(
        "  <title>{} — runtime configuration</title>\n",
        escape(&report.service_name)
    ));
    out.push_str(&format!("  <style>{PAGE_CSS}</style>\n"));
    out.push_str("</head>\n<body>\n");

    out.push_str("<header>\n");
    out.push_str(&format!(
        "  <h1>{} {}</h1>\n",
        escape(&report.service_name),
        escape(report.version)
    ));
    out.push_str(&format!(
        "  <p>runtime configuration report — generated {}</p>\n",
        report.generated_at.to_rfc3339()
    ));
    out.push_str("</header>\n");

    for section in &report.sections {
        render_section(&mut out, section);
    }

    if !report.conditions.is_empty() {
        out.push_str("<section>\n  <h2>Conditions</h2>\n  <table>\n");
        for condition in &report.conditions {
            out.push_str(&format!(
                "    <tr><td class=\"severity\">{}</td><td>{}: {}</td></tr>\n",
                condition.severity,
                escape(condition.source),
                escape(&condition.message)
            ));
        }
        out.push_str("  </table>\n</section>\n");
    }

    out.push_str("</body>\n</html>\n");
    out
}

fn render_section(out: &mut String, section: &Section) {
    out.push_str("<section>\n");
    out.push_str(&format!("  <h2>{}</h2>\n", escape(section.title)));
    out.push_str("  <table>\n");
    for (key, value) in &section.rows {
        out.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td></tr>\n",
            escape(key),
            escape(value)
        ));
    }
    out.push_str("  </table>\n</section>\n");
}

/// Minimal HTML escaping for text nodes and attribute values.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
