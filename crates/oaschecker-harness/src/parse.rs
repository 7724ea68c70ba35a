//! Parsers that recover structured sub-test results from captured harness
//! stdout+stderr text. Two independent parsers are required because the
//! generated test may target either a native xUnit-style framework or a
//! BDD-style one; both operate on plain text, no process spawning.

use crate::types::{SubTestOutcome, SubTestResult};

const BLANK_LINE_BUDGET: usize = 10;

/// Line-oriented scan for `RUN <name>`, `FAIL <name> (<duration>)`,
/// `SKIP <name> (<duration>)`. A test passes if it was opened with `RUN` and
/// never closed with `FAIL`/`SKIP`. Message lines are attributed to the most
/// recently opened test until a terminator line or a run of
/// `BLANK_LINE_BUDGET` blank lines is seen.
#[must_use]
pub fn parse_native(output: &str) -> Vec<SubTestResult> {
    let mut results: Vec<SubTestResult> = Vec::new();
    let mut open: Option<usize> = None;
    let mut blank_run = 0usize;

    for line in output.lines() {
        let trimmed = line.trim();

        if let Some(name) = trimmed.strip_prefix("RUN ") {
            results.push(SubTestResult {
                name: name.trim().to_string(),
                outcome: SubTestOutcome::Pass,
                message: String::new(),
            });
            open = Some(results.len() - 1);
            blank_run = 0;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("FAIL ") {
            let name = rest.split(" (").next().unwrap_or(rest).trim();
            match open.and_then(|i| results.get_mut(i)) {
                Some(entry) if entry.name == name => entry.outcome = SubTestOutcome::Fail,
                _ => results.push(SubTestResult {
                    name: name.to_string(),
                    outcome: SubTestOutcome::Fail,
                    message: String::new(),
                }),
            }
            open = None;
            blank_run = 0;
            continue;
        }

        if let Some(rest) = trimmed.strip_prefix("SKIP ") {
            let name = rest.split(" (").next().unwrap_or(rest).trim();
            match open.and_then(|i| results.get_mut(i)) {
                Some(entry) if entry.name == name => entry.outcome = SubTestOutcome::Skip,
                _ => results.push(SubTestResult {
                    name: name.to_string(),
                    outcome: SubTestOutcome::Skip,
                    message: String::new(),
                }),
            }
            open = None;
            blank_run = 0;
            continue;
        }

        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run >= BLANK_LINE_BUDGET {
                open = None;
            }
            continue;
        }
        blank_run = 0;

        if let Some(i) = open {
            let entry = &mut results[i];
            if !entry.message.is_empty() {
                entry.message.push('\n');
            }
            entry.message.push_str(trimmed);
        }
    }

    results
}

/// BDD-style summary line: `Ran N of M Specs`. Recovers only totals (no
/// per-test names), used when the generated code chose an alternative
/// testing framework.
#[must_use]
pub fn parse_bdd_totals(output: &str) -> Option<(u32, u32)> {
    for line in output.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("Ran ") {
            let mut parts = rest.split_whitespace();
            let ran: u32 = parts.next()?.parse().ok()?;
            if parts.next() != Some("of") {
                continue;
            }
            let total: u32 = parts.next()?.parse().ok()?;
            return Some((ran, total));
        }
    }
    None
}

/// Heuristic for recognizing build/dependency-resolution diagnostics in
/// process output, used to distinguish `compile_error` from `runtime_error`.
#[must_use]
pub fn looks_like_compile_diagnostic(output: &str) -> bool {
    const MARKERS: &[&str] = &[
        "error[E",
        "error: could not compile",
        "unresolved import",
        "cannot find",
        "failed to resolve dependencies",
        "ModuleNotFoundError",
        "SyntaxError",
        "Compilation failed",
    ];
    MARKERS.iter().any(|m| output.contains(m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_parser_attributes_messages_to_open_test() {
        let output = "RUN test_status_ok\nexpected 200 got 404\nFAIL test_status_ok (3ms)\n";
        let results = parse_native(output);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].name, "test_status_ok");
        assert_eq!(results[0].outcome, SubTestOutcome::Fail);
        assert!(results[0].message.contains("expected 200 got 404"));
    }

    #[test]
    fn native_parser_marks_unterminated_run_as_pass() {
        let output = "RUN test_ok\nRUN test_ok_2\n";
        let results = parse_native(output);
        assert_eq!(results.len(), 2);
        assert!(results.iter().all(|r| r.outcome == SubTestOutcome::Pass));
    }

    #[test]
    fn native_parser_stops_attributing_after_blank_budget() {
        let mut output = String::from("RUN test_a\n");
        for _ in 0..(BLANK_LINE_BUDGET + 1) {
            output.push('\n');
        }
        output.push_str("stray trailing text\n");
        let results = parse_native(&output);
        assert_eq!(results.len(), 1);
        assert!(results[0].message.is_empty());
    }

    #[test]
    fn bdd_parser_extracts_totals() {
        assert_eq!(parse_bdd_totals("Ran 3 of 5 Specs"), Some((3, 5)));
        assert_eq!(parse_bdd_totals("no match here"), None);
    }

    #[test]
    fn compile_diagnostic_detection() {
        assert!(looks_like_compile_diagnostic("error[E0433]: failed to resolve"));
        assert!(!looks_like_compile_diagnostic("assertion failed: left == right"));
    }
}
