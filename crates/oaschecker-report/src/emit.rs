//! Report emission: format is derived from the output path's suffix
//! (`.md` -> Markdown, `.html` -> HTML, otherwise JSON). All three
//! representations must round-trip the same underlying [`Report`].

use std::fmt::Write as _;
use std::path::Path;

use crate::model::Report;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    Html,
    Json,
}

#[must_use]
pub fn format_for(path: &Path) -> Format {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("md") => Format::Markdown,
        Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => Format::Html,
        _ => Format::Json,
    }
}

pub fn render(report: &Report, format: Format) -> Result<String, serde_json::Error> {
    match format {
        Format::Markdown => Ok(render_markdown(report)),
        Format::Html => Ok(render_html(report)),
        Format::Json => serde_json::to_string_pretty(report),
    }
}

fn render_markdown(report: &Report) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", report.title);

    out.push_str("## Summary\n\n");
    let _ = writeln!(out, "Generated: {}  ", report.generated_at.to_rfc3339());
    let _ = writeln!(out, "Health score: **{:.1}**  ", report.health_score);
    let _ = writeln!(out, "Operations: {}\n", report.operations.len());

    out.push_str("## Specification\n\n");
    let _ = writeln!(out, "Spec version: {}\n", report.spec_version);

    out.push_str("## Provider Comparison\n\n");
    out.push_str("| Provider | Generated | Passed | Failed | Success rate | Quality | Coverage | Composite |\n");
    out.push_str("|---|---|---|---|---|---|---|---|\n");
    for agg in &report.provider_aggregates {
        let _ = writeln!(
            out,
            "| {} | {} | {} | {} | {:.0}% | {:.1} | {:.1} | {:.1} |",
            agg.provider,
            agg.generated,
            agg.passed,
            agg.failed,
            agg.success_rate * 100.0,
            agg.quality,
            agg.coverage,
            agg.composite_score,
        );
    }

    out.push_str("\n## Rankings\n\n");
    for ranking in &report.rankings {
        let _ = writeln!(out, "- **{}**: {}", ranking.criterion, ranking.order.join(" > "));
    }

    out.push_str("\n## Operation Results\n\n");
    for op in &report.operations {
        let _ = writeln!(out, "### {} {}\n", op.operation.method, op.operation.path);
        for (provider, record) in &op.by_provider {
            let _ = writeln!(out, "- `{provider}`: {:?}", record.outcome);
        }
        if let Some(handle) = &op.issue_handle {
            let _ = writeln!(out, "- tracked as issue `{}`", handle.0);
        }
        out.push('\n');
    }

    out.push_str("## Recommendations\n\n");
    for line in &report.recommendations {
        let _ = writeln!(out, "- {line}");
    }

    out
}

fn render_html(report: &Report) -> String {
    let mut out = String::new();
    out.push_str("<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>");
    out.push_str(&html_escape(&report.title));
    out.push_str("</title></head><body>\n");
    let _ = writeln!(out, "<h1>{}</h1>", html_escape(&report.title));
    let _ = writeln!(out, "<p>Health score: <strong>{:.1}</strong></p>", report.health_score);

    out.push_str("<table border=\"1\"><tr><th>Provider</th><th>Generated</th><th>Passed</th><th>Failed</th><th>Success rate</th><th>Composite</th></tr>\n");
    for agg in &report.provider_aggregates {
        let _ = writeln!(
            out,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.0}%</td><td>{:.1}</td></tr>",
            html_escape(&agg.provider),
            agg.generated,
            agg.passed,
            agg.failed,
            agg.success_rate * 100.0,
            agg.composite_score,
        );
    }
    out.push_str("</table>\n</body></html>\n");
    out
}

fn html_escape(input: &str) -> String {
    input.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
