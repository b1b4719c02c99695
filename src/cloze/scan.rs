//! Markup scanner
//!
//! Walks normalized HTML once, left to right. At every step both marker
//! grammars are searched in the same remaining text and the earlier
//! occurrence is consumed:
//!
//! - `!!text!!` becomes `<span id='container_highlight_<n>'></span>`
//! - a blank marker becomes `<span id='container_blank_<n>'></span>`, or a bare
//!   `<span></span>` once the blank templates are used up
//!
//! Scan state is an explicit accumulator ([`ScanState`]) folded over the
//! [`Markers`] iterator.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::cloze::element::{container_id, Blank, ElementRef, Highlight};
use crate::cloze::normalize::{denormalize, BLANK_MARKER};

/// Static regex for highlight markers
/// Format: !!text!! with 1-40 characters of text on a single line, shortest match
pub static HIGHLIGHT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!!([^\n\r\x{2028}\x{2029}]{1,40}?)!!").expect("Invalid HIGHLIGHT_RE regex")
});

/// Anchor emitted for blank markers that have no template
pub const UNLINKED_ANCHOR: &str = "<span></span>";

/// Anchor element for an element id
pub fn anchor(element_id: &str) -> String {
    format!("<span id='{}'></span>", container_id(element_id))
}

/// What kind of marker was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerKind {
    /// Highlight with its captured text (blank markers inside are restored to `___`)
    Highlight(String),
    Blank,
}

/// A marker occurrence in normalized HTML
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// Byte offset of the first marker byte
    pub start: usize,
    /// Byte offset just past the marker
    pub end: usize,
    pub kind: MarkerKind,
}

/// Result of a marker search: unsearched, exhausted, or the next occurrence
type Lookahead = Option<Option<Marker>>;

/// Iterator over marker occurrences in document order
///
/// The next marker of each kind is cached until it is consumed or the cursor
/// moves past its start, so each grammar is searched over the text once.
pub struct Markers<'a> {
    html: &'a str,
    pos: usize,
    highlight: Lookahead,
    blank: Lookahead,
}

impl<'a> Markers<'a> {
    pub fn new(html: &'a str) -> Self {
        Self {
            html,
            pos: 0,
            highlight: None,
            blank: None,
        }
    }

    fn next_highlight(&self, rest: &str) -> Option<Marker> {
        let caps = HIGHLIGHT_RE.captures(rest)?;
        let whole = caps.get(0)?;
        let text = caps.get(1).map(|m| denormalize(m.as_str()))?;

        Some(Marker {
            start: self.pos + whole.start(),
            end: self.pos + whole.end(),
            kind: MarkerKind::Highlight(text),
        })
    }

    fn next_blank(&self, rest: &str) -> Option<Marker> {
        rest.find(BLANK_MARKER).map(|offset| Marker {
            start: self.pos + offset,
            end: self.pos + offset + BLANK_MARKER.len(),
            kind: MarkerKind::Blank,
        })
    }
}

/// Whether a cached search has to run again from `pos`
fn is_stale(cached: &Lookahead, pos: usize) -> bool {
    match cached {
        None => true,
        Some(Some(marker)) => marker.start < pos,
        Some(None) => false,
    }
}

impl Iterator for Markers<'_> {
    type Item = Marker;

    fn next(&mut self) -> Option<Marker> {
        let html = self.html;
        let rest = &html[self.pos..];
        if is_stale(&self.highlight, self.pos) {
            self.highlight = Some(self.next_highlight(rest));
        }
        if is_stale(&self.blank, self.pos) {
            self.blank = Some(self.next_blank(rest));
        }

        // Both lookaheads are valid for the same remaining text. A blank marker
        // inside a highlight that starts earlier belongs to the highlight.
        let take_highlight = match (&self.highlight, &self.blank) {
            (Some(Some(highlight)), Some(Some(blank))) => highlight.start < blank.start,
            (Some(Some(_)), _) => true,
            (_, Some(Some(_))) => false,
            _ => return None,
        };
        let next = if take_highlight {
            self.highlight.take()
        } else {
            self.blank.take()
        }
        .flatten()?;

        self.pos = next.end;
        Some(next)
    }
}

/// Everything a scan produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanOutput {
    /// HTML with anchors in place of markers
    pub html: String,

    /// All elements in document order
    pub order: Vec<ElementRef>,

    /// Highlights in document order
    pub highlights: Vec<Highlight>,

    /// Blanks in document order
    pub blanks: Vec<Blank>,

    /// 1-indexed lines of blank markers that had no template
    pub unlinked_blank_lines: Vec<u32>,

    /// Templates left over after all blank markers were consumed
    pub unused_templates: usize,
}

/// Accumulator threaded through the scan
#[derive(Debug)]
pub struct ScanState<'t> {
    templates: &'t [Blank],
    html: String,
    cursor: usize,
    line: u32,
    order: Vec<ElementRef>,
    highlights: Vec<Highlight>,
    blanks: Vec<Blank>,
    unlinked_blank_lines: Vec<u32>,
}

impl<'t> ScanState<'t> {
    pub fn new(templates: &'t [Blank]) -> Self {
        Self {
            templates,
            html: String::new(),
            cursor: 0,
            line: 1,
            order: Vec::new(),
            highlights: Vec::new(),
            blanks: Vec::new(),
            unlinked_blank_lines: Vec::new(),
        }
    }

    /// Copy source text up to `until` into the output
    fn copy_through(&mut self, source: &str, until: usize) {
        let gap = &source[self.cursor..until];
        self.line += gap.matches('\n').count() as u32;
        self.html.push_str(gap);
        self.cursor = until;
    }

    /// Consume one marker of `source`
    pub fn absorb(mut self, source: &str, marker: Marker) -> Self {
        self.copy_through(source, marker.start);

        match marker.kind {
            MarkerKind::Highlight(text) => {
                let highlight = Highlight::new(text, self.highlights.len());
                tracing::trace!(id = %highlight.id, text = %highlight.text, "highlight");
                self.html.push_str(&anchor(&highlight.id));
                self.order.push(ElementRef::Highlight(self.highlights.len()));
                self.highlights.push(highlight);
            }
            MarkerKind::Blank => match self.templates.get(self.blanks.len()) {
                Some(template) => {
                    let blank = template.instantiate(self.blanks.len());
                    tracing::trace!(id = %blank.id, "blank");
                    self.html.push_str(&anchor(&blank.id));
                    self.order.push(ElementRef::Blank(self.blanks.len()));
                    self.blanks.push(blank);
                }
                None => {
                    tracing::debug!(line = self.line, "blank marker without answer template");
                    self.html.push_str(UNLINKED_ANCHOR);
                    self.unlinked_blank_lines.push(self.line);
                }
            },
        }

        self.cursor = marker.end;
        self
    }

    /// Copy the tail and hand out the sequences
    pub fn finish(mut self, source: &str) -> ScanOutput {
        self.copy_through(source, source.len());

        let unused_templates = self.templates.len().saturating_sub(self.blanks.len());
        if unused_templates > 0 {
            tracing::debug!(unused = unused_templates, "answer templates without blank marker");
        }

        ScanOutput {
            html: self.html,
            order: self.order,
            highlights: self.highlights,
            blanks: self.blanks,
            unlinked_blank_lines: self.unlinked_blank_lines,
            unused_templates,
        }
    }
}

/// Scan normalized HTML, replacing markers with anchors
pub fn scan(normalized: &str, templates: &[Blank]) -> ScanOutput {
    Markers::new(normalized)
        .fold(ScanState::new(templates), |state, marker| {
            state.absorb(normalized, marker)
        })
        .finish(normalized)
}
