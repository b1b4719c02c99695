//! Cloze elements: highlights and blanks
//!
//! Both kinds are owned by the [`Cloze`](crate::cloze::Cloze) that discovered
//! them. Blanks refer to highlights by id only.

use serde::{Deserialize, Serialize};

/// Discriminator of a cloze element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Highlight,
    Blank,
}

impl ElementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Highlight => "highlight",
            ElementKind::Blank => "blank",
        }
    }
}

/// An author-marked span of emphasized text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Highlight {
    /// Identifier, `highlight_<n>`
    pub id: String,

    /// Text captured between the `!!` delimiters
    pub text: String,
}

impl Highlight {
    pub fn new(text: impl Into<String>, index: usize) -> Self {
        Self {
            id: format!("highlight_{}", index),
            text: text.into(),
        }
    }
}

/// A fill-in-the-gap slot
///
/// Templates come from the author with an empty `id`; the scanner clones one
/// per blank marker and fills in `id` and the highlight links.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blank {
    /// Identifier, `blank_<n>` (empty on templates)
    #[serde(default)]
    pub id: String,

    /// Accepted answers
    #[serde(default)]
    pub correct_answers: Vec<String>,

    /// Optional hint shown to the learner
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,

    /// Set by an external grader; `None` until graded
    #[serde(default)]
    pub is_correct: Option<bool>,

    /// Ids of highlights before this blank, nearest first
    #[serde(default)]
    pub highlights_before: Vec<String>,

    /// Ids of highlights after this blank, nearest first
    #[serde(default)]
    pub highlights_after: Vec<String>,
}

impl Blank {
    /// Create a template accepting the given answers
    pub fn new(correct_answers: Vec<String>) -> Self {
        Self {
            correct_answers,
            ..Default::default()
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Clone a template into the blank instance at `index`
    ///
    /// Links are cleared so a template that already carries ids cannot leak
    /// them into the new instance.
    pub fn instantiate(&self, index: usize) -> Self {
        Self {
            id: format!("blank_{}", index),
            highlights_before: Vec::new(),
            highlights_after: Vec::new(),
            ..self.clone()
        }
    }

    /// Attach the highlights found around this blank
    pub fn link_highlights(&mut self, before: Vec<String>, after: Vec<String>) {
        self.highlights_before = before;
        self.highlights_after = after;
    }
}

/// Position of an element within its kind's collection, in document order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "index", rename_all = "lowercase")]
pub enum ElementRef {
    Highlight(usize),
    Blank(usize),
}

impl ElementRef {
    pub fn kind(&self) -> ElementKind {
        match self {
            ElementRef::Highlight(_) => ElementKind::Highlight,
            ElementRef::Blank(_) => ElementKind::Blank,
        }
    }
}

/// A borrowed view of either element kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClozeElement<'a> {
    Highlight(&'a Highlight),
    Blank(&'a Blank),
}

impl<'a> ClozeElement<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ClozeElement::Highlight(h) => &h.id,
            ClozeElement::Blank(b) => &b.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            ClozeElement::Highlight(_) => ElementKind::Highlight,
            ClozeElement::Blank(_) => ElementKind::Blank,
        }
    }

    /// Id of the anchor this element is mounted into
    pub fn container_id(&self) -> String {
        container_id(self.id())
    }
}

/// Anchor id for an element id
pub fn container_id(element_id: &str) -> String {
    format!("container_{}", element_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_id() {
        let highlight = Highlight::new("France", 3);
        assert_eq!(highlight.id, "highlight_3");
        assert_eq!(highlight.text, "France");
    }

    #[test]
    fn test_instantiate_leaves_template_untouched() {
        let mut template = Blank::new(vec!["Paris".to_string()]).with_hint("city");
        template.highlights_before = vec!["stale".to_string()];

        let blank = template.instantiate(2);

        assert_eq!(blank.id, "blank_2");
        assert_eq!(blank.correct_answers, vec!["Paris"]);
        assert_eq!(blank.hint.as_deref(), Some("city"));
        assert!(blank.highlights_before.is_empty());
        assert!(template.id.is_empty());
        assert_eq!(template.highlights_before, vec!["stale"]);
    }

    #[test]
    fn test_instantiate_keeps_grading_flag() {
        let mut template = Blank::new(vec![]);
        template.is_correct = Some(true);
        assert_eq!(template.instantiate(0).is_correct, Some(true));
    }

    #[test]
    fn test_element_view() {
        let highlight = Highlight::new("x", 0);
        let blank = Blank::new(vec![]).instantiate(0);

        let h = ClozeElement::Highlight(&highlight);
        let b = ClozeElement::Blank(&blank);

        assert_eq!(h.kind(), ElementKind::Highlight);
        assert_eq!(b.kind(), ElementKind::Blank);
        assert_eq!(h.container_id(), "container_highlight_0");
        assert_eq!(b.container_id(), "container_blank_0");
    }

    #[test]
    fn test_element_ref_serialization() {
        let json = serde_json::to_string(&ElementRef::Blank(1)).unwrap();
        assert_eq!(json, r#"{"type":"blank","index":1}"#);
        assert_eq!(ElementRef::Highlight(0).kind(), ElementKind::Highlight);
    }

    #[test]
    fn test_blank_template_deserializes_with_defaults() {
        let blank: Blank = serde_json::from_str(r#"{"correct_answers":["a","b"]}"#).unwrap();
        assert!(blank.id.is_empty());
        assert_eq!(blank.is_correct, None);
        assert_eq!(blank.correct_answers.len(), 2);
    }
}
