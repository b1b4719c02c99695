//! Command handlers - load inputs, build the cloze, render the ResultSet

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use clozer::cloze::lint::lint_cloze;
use clozer::cloze::Cloze;
use clozer::core::input::{load_blanks, load_media, read_markup};
use clozer::core::model::{ResultItem, ResultSet};
use clozer::core::render::Renderer;

use crate::cli::{Outcome, Settings};

/// A built cloze and how its markup was decoded
struct Loaded {
    cloze: Cloze,

    /// Invalid UTF-8 in the markup was replaced
    lossy: bool,
}

/// Read all inputs and build the cloze
fn load_cloze(
    html: &Path,
    blanks: Option<&Path>,
    media: Option<&Path>,
    settings: Settings,
) -> Result<Loaded> {
    let markup = read_markup(html, &settings.input)?;

    let templates = match blanks {
        Some(path) => load_blanks(path)?,
        None => Vec::new(),
    };
    let media = match media {
        Some(path) => load_media(path)?,
        None => Vec::new(),
    };

    tracing::debug!(
        path = %html.display(),
        bytes = markup.content.len(),
        templates = templates.len(),
        media = media.len(),
        "building cloze"
    );

    Ok(Loaded {
        cloze: Cloze::create(&markup.content, &templates, media),
        lossy: markup.lossy_conversion,
    })
}

fn print(result_set: &ResultSet, settings: Settings) -> Result<()> {
    let stdout = std::io::stdout();
    Renderer::new(settings.render)
        .render_to(result_set, stdout.lock())
        .context("Failed to write output")
}

/// Run the build command
pub fn run_build(
    html: &Path,
    blanks: Option<&Path>,
    media: Option<&Path>,
    settings: Settings,
) -> Result<Outcome> {
    let Loaded { cloze, lossy } = load_cloze(html, blanks, media, settings)?;
    let result_set = ResultSet::from_cloze(&cloze, &html.display().to_string());
    print(&result_set, settings)?;

    if !settings.quiet {
        let mut summary = format!(
            "{} highlight(s), {} blank(s)",
            cloze.highlights.len(),
            cloze.blanks.len()
        );
        if lossy {
            summary.push_str(&format!(", {}", "markup was not valid UTF-8".yellow()));
        }
        if !cloze.diagnostics.is_clean() {
            summary.push_str(&format!(
                ", {}",
                "run `clozer lint` for authoring warnings".yellow()
            ));
        }
        eprintln!("{} {}", "built".green().bold(), summary);
    }

    Ok(Outcome::Success)
}

/// Run the lint command
pub fn run_lint(html: &Path, blanks: Option<&Path>, settings: Settings) -> Result<Outcome> {
    let cloze = load_cloze(html, blanks, None, settings)?.cloze;
    let issues = lint_cloze(&cloze, &html.display().to_string());

    let mut result_set = ResultSet::new();
    result_set.extend(issues.iter().map(|issue| issue.to_result_item()));
    print(&result_set, settings)?;

    let failed = result_set.has_errors();
    if !settings.quiet {
        let status = if failed {
            "failed".red().bold()
        } else if result_set.is_empty() {
            "clean".green().bold()
        } else {
            "passed".yellow().bold()
        };
        eprintln!("{} {} issue(s)", status, result_set.len());
    }

    Ok(if failed {
        Outcome::LintErrors
    } else {
        Outcome::Success
    })
}

/// Run the check command
pub fn run_check(html: &Path, blanks: Option<&Path>, settings: Settings) -> Result<Outcome> {
    let cloze = load_cloze(html, blanks, None, settings)?.cloze;
    let path = html.display().to_string();

    let count = |flag: Option<bool>| cloze.blanks.iter().filter(|b| b.is_correct == flag).count();
    let correct = count(Some(true));
    let incorrect = count(Some(false));
    let ungraded = count(None);
    let complete = cloze.check_completeness();

    let mut result_set = ResultSet::new();
    result_set.extend(
        cloze
            .blanks
            .iter()
            .map(|blank| ResultItem::blank(blank).with_path(&path)),
    );
    result_set.push(
        ResultItem::status(
            if complete { "complete" } else { "incomplete" },
            serde_json::json!({
                "complete": complete,
                "blanks": cloze.blanks.len(),
                "correct": correct,
                "incorrect": incorrect,
                "ungraded": ungraded,
            }),
        )
        .with_path(&path),
    );
    print(&result_set, settings)?;

    if !settings.quiet {
        let status = if complete {
            "complete".green().bold()
        } else {
            "incomplete".red().bold()
        };
        eprintln!(
            "{} {}/{} correct, {} incorrect, {} ungraded",
            status,
            correct,
            cloze.blanks.len(),
            incorrect,
            ungraded
        );
    }

    Ok(if complete {
        Outcome::Success
    } else {
        Outcome::Incomplete
    })
}
