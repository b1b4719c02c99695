//! Golden tests for clozer
//!
//! These tests verify that command outputs match expected golden files.
//! Golden tests ensure:
//! - Output format stability across versions
//! - Stable element ids and anchor order
//! - No unexpected regressions in output structure

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get the path to the capitals exercise
fn capitals() -> PathBuf {
    fixtures_dir().join("capitals")
}

/// Create a command for running clozer binary
fn clozer_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("clozer"));
    cmd.env_remove("CLOZER_FORMAT").env_remove("RUST_LOG");
    cmd
}

/// Parse JSONL output into a vector of JSON values
fn parse_jsonl(output: &str) -> Vec<Value> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .collect()
}

fn build(format: &str) -> String {
    let output = clozer_cmd()
        .arg("build")
        .arg(capitals().join("exercise.html"))
        .arg("--blanks")
        .arg(capitals().join("answers.json"))
        .arg("--media")
        .arg(capitals().join("media.json"))
        .arg("--format")
        .arg(format)
        .output()
        .expect("failed to execute");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ==================== Build Tests ====================

    #[test]
    fn golden_build_raw_markup() {
        let expected = fs::read_to_string(capitals().join("expected.html")).unwrap();
        assert_eq!(build("raw"), expected);
    }

    #[test]
    fn golden_build_element_order() {
        let items = parse_jsonl(&build("jsonl"));

        let ids: Vec<&str> = items
            .iter()
            .filter_map(|v| v.get("id").and_then(|id| id.as_str()))
            .collect();

        assert_eq!(
            ids,
            vec![
                "highlight_0",
                "blank_0",
                "highlight_1",
                "blank_1",
                "highlight_2",
                "blank_2"
            ]
        );
    }

    #[test]
    fn golden_build_links() {
        let items = parse_jsonl(&build("jsonl"));
        let blank = |id: &str| {
            items
                .iter()
                .find(|v| v["id"] == id)
                .map(|v| v["data"].clone())
                .expect("blank present")
        };

        assert_eq!(blank("blank_0")["highlights_before"], serde_json::json!(["highlight_0"]));
        assert_eq!(
            blank("blank_0")["highlights_after"],
            serde_json::json!(["highlight_1", "highlight_2"])
        );
        assert_eq!(
            blank("blank_1")["highlights_before"],
            serde_json::json!(["highlight_1", "highlight_0"])
        );
        assert_eq!(
            blank("blank_2")["highlights_before"],
            serde_json::json!(["highlight_2", "highlight_1", "highlight_0"])
        );
        assert_eq!(blank("blank_2")["highlights_after"], serde_json::json!([]));
        assert_eq!(blank("blank_2")["hint"], "Eternal City");
        assert_eq!(blank("blank_1")["correct_answers"], serde_json::json!(["Berlin", "berlin"]));
    }

    #[test]
    fn golden_build_media_passthrough() {
        let items = parse_jsonl(&build("jsonl"));
        let html = items.last().unwrap();

        assert_eq!(html["kind"], "html");
        assert_eq!(html["data"]["media"][0]["source"], "europe.png");
        assert_eq!(html["data"]["media"][0]["type"], "image");
    }

    #[test]
    fn golden_build_json_matches_jsonl() {
        let array: Vec<Value> = serde_json::from_str(&build("json")).unwrap();
        assert_eq!(array, parse_jsonl(&build("jsonl")));
    }

    #[test]
    fn golden_build_markdown() {
        let output = build("md");

        assert!(output.contains("## Highlights"));
        assert!(output.contains("- `highlight_1`: Spree"));
        assert!(output.contains("### `blank_2`"));
        assert!(output.contains("- hint: Eternal City"));
        assert!(output.contains("- highlights before: highlight_2, highlight_1, highlight_0"));
    }

    // ==================== Check Tests ====================

    #[test]
    fn golden_check_graded() {
        let output = clozer_cmd()
            .arg("check")
            .arg(capitals().join("exercise.html"))
            .arg("--blanks")
            .arg(capitals().join("graded.json"))
            .output()
            .expect("failed to execute");

        assert_eq!(output.status.code(), Some(2));
        let items = parse_jsonl(&String::from_utf8_lossy(&output.stdout));
        let status = items.last().unwrap();
        assert_eq!(status["data"]["correct"], 2);
        assert_eq!(status["data"]["incorrect"], 1);
        assert_eq!(status["data"]["ungraded"], 0);
    }

    // ==================== Lint Tests ====================

    #[test]
    fn golden_lint_clean() {
        let output = clozer_cmd()
            .arg("lint")
            .arg(capitals().join("exercise.html"))
            .arg("--blanks")
            .arg(capitals().join("answers.json"))
            .output()
            .expect("failed to execute");

        assert!(output.status.success());
        assert!(output.stdout.is_empty());
    }
}
