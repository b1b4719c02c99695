//! The cloze aggregate
//!
//! Build with [`Cloze::create`]. Construction never fails: markup without
//! markers gives a cloze with no elements, and authoring mistakes are
//! recorded in [`ScanDiagnostics`] instead of being raised.

use serde::{Deserialize, Serialize};

use crate::cloze::element::{Blank, ClozeElement, ElementRef, Highlight};
use crate::cloze::link::link_highlights;
use crate::cloze::media::MediaElement;
use crate::cloze::normalize::normalize_blank_markers;
use crate::cloze::scan::scan;

/// Authoring problems noticed while scanning
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanDiagnostics {
    /// 1-indexed lines of blank markers that got no answer template
    #[serde(default)]
    pub unlinked_blank_lines: Vec<u32>,

    /// Answer templates left without a blank marker
    #[serde(default)]
    pub unused_templates: usize,
}

impl ScanDiagnostics {
    pub fn is_clean(&self) -> bool {
        self.unlinked_blank_lines.is_empty() && self.unused_templates == 0
    }
}

/// A processed cloze exercise
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cloze {
    /// Markup with anchors in place of markers
    pub html: String,

    /// Highlights in document order
    pub highlights: Vec<Highlight>,

    /// Blanks in document order
    pub blanks: Vec<Blank>,

    /// All elements in document order
    pub order: Vec<ElementRef>,

    /// Media passed through for the renderer
    #[serde(default)]
    pub media: Vec<MediaElement>,

    #[serde(default)]
    pub diagnostics: ScanDiagnostics,
}

impl Cloze {
    /// Build a cloze from authored markup
    ///
    /// `blanks` are answer templates in document order; they are cloned, not
    /// modified. Markers beyond the last template become bare anchors and
    /// templates beyond the last marker are ignored.
    pub fn create(html: &str, blanks: &[Blank], media: Vec<MediaElement>) -> Self {
        let normalized = normalize_blank_markers(html);
        let output = scan(&normalized, blanks);

        let mut blank_instances = output.blanks;
        link_highlights(&output.order, &output.highlights, &mut blank_instances);

        Self {
            html: output.html,
            highlights: output.highlights,
            blanks: blank_instances,
            order: output.order,
            media,
            diagnostics: ScanDiagnostics {
                unlinked_blank_lines: output.unlinked_blank_lines,
                unused_templates: output.unused_templates,
            },
        }
    }

    /// True if every blank was graded correct (vacuously true without blanks)
    pub fn check_completeness(&self) -> bool {
        self.blanks.iter().all(|blank| blank.is_correct == Some(true))
    }

    /// Elements in document order
    pub fn elements(&self) -> impl Iterator<Item = ClozeElement<'_>> + '_ {
        self.order.iter().filter_map(move |element| match element {
            ElementRef::Highlight(i) => self.highlights.get(*i).map(ClozeElement::Highlight),
            ElementRef::Blank(i) => self.blanks.get(*i).map(ClozeElement::Blank),
        })
    }

    pub fn highlight(&self, id: &str) -> Option<&Highlight> {
        self.highlights.iter().find(|h| h.id == id)
    }

    pub fn blank(&self, id: &str) -> Option<&Blank> {
        self.blanks.iter().find(|b| b.id == id)
    }

    /// Mutable access for graders setting `is_correct`
    pub fn blank_mut(&mut self, id: &str) -> Option<&mut Blank> {
        self.blanks.iter_mut().find(|b| b.id == id)
    }

    /// Highlights before `blank`, nearest first
    pub fn highlights_before<'a>(
        &'a self,
        blank: &'a Blank,
    ) -> impl Iterator<Item = &'a Highlight> + 'a {
        blank
            .highlights_before
            .iter()
            .filter_map(move |id| self.highlight(id))
    }

    /// Highlights after `blank`, nearest first
    pub fn highlights_after<'a>(
        &'a self,
        blank: &'a Blank,
    ) -> impl Iterator<Item = &'a Highlight> + 'a {
        blank
            .highlights_after
            .iter()
            .filter_map(move |id| self.highlight(id))
    }
}
