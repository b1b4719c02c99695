//! Renderer module
//!
//! Renders a ResultSet as jsonl, json, md or raw markup.

use serde::Serialize;
use std::io::Write;

use crate::core::model::{Kind, ResultItem, ResultSet, Severity};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl OutputFormat {
    /// Names accepted on the command line
    const NAMES: [(&'static str, OutputFormat); 5] = [
        ("jsonl", OutputFormat::Jsonl),
        ("json", OutputFormat::Json),
        ("md", OutputFormat::Markdown),
        ("markdown", OutputFormat::Markdown),
        ("raw", OutputFormat::Raw),
    ];

    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Json => "json",
            OutputFormat::Markdown => "md",
            OutputFormat::Raw => "raw",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_ascii_lowercase();
        Self::NAMES
            .iter()
            .find(|(name, _)| *name == wanted)
            .map(|(_, format)| *format)
            .ok_or_else(|| format!("Unknown format: {} (expected jsonl, json, md or raw)", s))
    }
}

/// Output format plus JSON layout
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
}

impl RenderConfig {
    /// Indent JSON output. Markdown and raw output ignore this.
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }
}

impl From<OutputFormat> for RenderConfig {
    fn from(format: OutputFormat) -> Self {
        Self {
            format,
            pretty: false,
        }
    }
}

/// Renders cloze result sets
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: impl Into<RenderConfig>) -> Self {
        Self {
            config: config.into(),
        }
    }

    /// Render a result set to a string
    pub fn render(&self, result_set: &ResultSet) -> serde_json::Result<String> {
        let items = &result_set.items;
        let output = match self.config.format {
            OutputFormat::Jsonl => items
                .iter()
                .map(|item| self.encode(item))
                .collect::<serde_json::Result<Vec<_>>>()?
                .join(if self.config.pretty { "\n\n" } else { "\n" }),
            OutputFormat::Json => self.encode(items)?,
            OutputFormat::Markdown => self.render_markdown(result_set),
            OutputFormat::Raw => items
                .iter()
                .filter(|item| item.kind == Kind::Html)
                .filter_map(|item| item.excerpt.as_deref())
                .collect::<Vec<_>>()
                .join("\n"),
        };
        Ok(output)
    }

    /// Render to a writer, ending with a newline
    pub fn render_to<W: Write>(
        &self,
        result_set: &ResultSet,
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render(result_set)?;
        writer.write_all(output.as_bytes())?;
        if !output.is_empty() && !output.ends_with('\n') {
            writer.write_all(b"\n")?;
        }
        Ok(())
    }

    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> serde_json::Result<String> {
        if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        }
    }

    /// Render as Markdown
    fn render_markdown(&self, result_set: &ResultSet) -> String {
        let mut output = String::new();

        let mut highlights = Vec::new();
        let mut blanks = Vec::new();
        let mut markup = Vec::new();
        let mut statuses = Vec::new();
        let mut issues = Vec::new();

        for item in &result_set.items {
            match item.kind {
                Kind::Highlight => highlights.push(item),
                Kind::Blank => blanks.push(item),
                Kind::Html => markup.push(item),
                Kind::Status => statuses.push(item),
                Kind::Issue => issues.push(item),
            }
        }

        if !issues.is_empty() {
            output.push_str("## Issues\n\n");
            for item in issues {
                self.render_issue_md(&mut output, item);
            }
            output.push('\n');
        }

        if !statuses.is_empty() {
            output.push_str("## Status\n\n");
            for item in statuses {
                if let Some(message) = &item.excerpt {
                    output.push_str(&format!("- {}\n", message));
                }
            }
            output.push('\n');
        }

        if !highlights.is_empty() {
            output.push_str("## Highlights\n\n");
            for item in highlights {
                output.push_str(&format!(
                    "- `{}`: {}\n",
                    item.id.as_deref().unwrap_or("?"),
                    item.excerpt.as_deref().unwrap_or("")
                ));
            }
            output.push('\n');
        }

        if !blanks.is_empty() {
            output.push_str("## Blanks\n\n");
            for item in blanks {
                self.render_blank_md(&mut output, item);
            }
            output.push('\n');
        }

        if !markup.is_empty() {
            output.push_str("## Markup\n\n");
            for item in markup {
                if let Some(path) = &item.path {
                    output.push_str(&format!("### `{}`\n", path));
                }
                if let Some(html) = &item.excerpt {
                    let fence = fence_for(html);
                    output.push_str(&format!("\n{}html\n", fence));
                    output.push_str(html);
                    if !html.ends_with('\n') {
                        output.push('\n');
                    }
                    output.push_str(&fence);
                    output.push('\n');
                }
            }
            output.push('\n');
        }

        output
    }

    fn render_issue_md(&self, output: &mut String, item: &ResultItem) {
        let label = match item.severity {
            Some(Severity::Error) => "error",
            _ => "warning",
        };
        for error in &item.errors {
            output.push_str(&format!("- **{}** ({}): {}", error.code, label, error.message));
            match (&item.path, item.line) {
                (Some(path), Some(line)) => output.push_str(&format!(" at `{}:{}`", path, line)),
                (Some(path), None) => output.push_str(&format!(" in `{}`", path)),
                _ => {}
            }
            output.push('\n');
        }
    }

    fn render_blank_md(&self, output: &mut String, item: &ResultItem) {
        output.push_str(&format!("### `{}`\n\n", item.id.as_deref().unwrap_or("?")));

        let Some(data) = &item.data else {
            return;
        };

        let list = |key: &str| -> String {
            data.get(key)
                .and_then(|v| v.as_array())
                .map(|values| {
                    values
                        .iter()
                        .filter_map(|v| v.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                })
                .unwrap_or_default()
        };

        output.push_str(&format!("- answers: {}\n", list("correct_answers")));
        if let Some(hint) = data.get("hint").and_then(|v| v.as_str()) {
            output.push_str(&format!("- hint: {}\n", hint));
        }
        let graded = match data.get("is_correct").and_then(|v| v.as_bool()) {
            Some(true) => "correct",
            Some(false) => "incorrect",
            None => "ungraded",
        };
        output.push_str(&format!("- graded: {}\n", graded));
        output.push_str(&format!("- highlights before: {}\n", list("highlights_before")));
        output.push_str(&format!("- highlights after: {}\n", list("highlights_after")));
        output.push('\n');
    }
}

/// Code fence longer than any backtick run in `content`
fn fence_for(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}
