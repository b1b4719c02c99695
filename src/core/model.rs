//! Unified Result Model
//!
//! Every command maps its output to this model before rendering.

use serde::{Deserialize, Serialize};

use crate::cloze::{Blank, Cloze, ClozeElement, Highlight};

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Highlight,
    Blank,
    Html,
    Status,
    Issue,
}

/// Severity of an issue item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Error information for a result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemError {
    pub code: String,
    pub message: String,
}

impl ItemError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Element id (highlights and blanks)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Source file the item belongs to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// 1-indexed source line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,

    /// Text payload: highlight text, transformed html or issue message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,

    /// Structured data payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ItemError>,
}

impl ResultItem {
    fn new(kind: Kind) -> Self {
        Self {
            kind,
            id: None,
            path: None,
            line: None,
            excerpt: None,
            data: None,
            severity: None,
            errors: Vec::new(),
        }
    }

    /// Create a highlight result
    pub fn highlight(highlight: &Highlight) -> Self {
        Self {
            id: Some(highlight.id.clone()),
            excerpt: Some(highlight.text.clone()),
            ..Self::new(Kind::Highlight)
        }
    }

    /// Create a blank result carrying answers, grading state and links
    pub fn blank(blank: &Blank) -> Self {
        Self {
            id: Some(blank.id.clone()),
            data: serde_json::to_value(blank).ok(),
            ..Self::new(Kind::Blank)
        }
    }

    /// Create a result holding transformed markup
    pub fn html(html: impl Into<String>) -> Self {
        Self {
            excerpt: Some(html.into()),
            ..Self::new(Kind::Html)
        }
    }

    /// Create a status result with a structured payload
    pub fn status(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            excerpt: Some(message.into()),
            data: Some(data),
            ..Self::new(Kind::Status)
        }
    }

    /// Create an issue result
    pub fn issue(severity: Severity, error: ItemError) -> Self {
        Self {
            excerpt: Some(error.message.clone()),
            severity: Some(severity),
            errors: vec![error],
            ..Self::new(Kind::Issue)
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_line(mut self, line: Option<u32>) -> Self {
        self.line = line;
        self
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<ClozeElement<'_>> for ResultItem {
    fn from(element: ClozeElement<'_>) -> Self {
        match element {
            ClozeElement::Highlight(highlight) => ResultItem::highlight(highlight),
            ClozeElement::Blank(blank) => ResultItem::blank(blank),
        }
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    pub fn extend(&mut self, items: impl IntoIterator<Item = ResultItem>) {
        self.items.extend(items);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Elements in document order followed by the transformed markup
    pub fn from_cloze(cloze: &Cloze, path: &str) -> Self {
        let mut result_set = ResultSet::new();
        result_set.extend(
            cloze
                .elements()
                .map(|element| ResultItem::from(element).with_path(path)),
        );

        let mut html = ResultItem::html(cloze.html.clone()).with_path(path);
        if !cloze.media.is_empty() {
            html = html.with_data(serde_json::json!({ "media": cloze.media }));
        }
        result_set.push(html);

        result_set
    }

    /// True if any issue item has error severity
    pub fn has_errors(&self) -> bool {
        self.items
            .iter()
            .any(|item| item.kind == Kind::Issue && item.severity == Some(Severity::Error))
    }
}
