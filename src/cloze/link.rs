//! Cross-linking of blanks to the highlights around them

use crate::cloze::element::{Blank, ElementRef, Highlight};

/// Ids of the highlights referenced in `refs`, in the iterator's order
fn highlight_ids<'a>(
    refs: impl Iterator<Item = &'a ElementRef>,
    highlights: &[Highlight],
) -> Vec<String> {
    refs.filter_map(|element| match element {
        ElementRef::Highlight(index) => highlights.get(*index).map(|h| h.id.clone()),
        ElementRef::Blank(_) => None,
    })
    .collect()
}

/// Attach to every blank the highlights before it (nearest first) and after
/// it (nearest first)
///
/// `order` is the document-order sequence of all elements; it is not changed.
pub fn link_highlights(order: &[ElementRef], highlights: &[Highlight], blanks: &mut [Blank]) {
    for (position, element) in order.iter().enumerate() {
        let ElementRef::Blank(index) = element else {
            continue;
        };
        let Some(blank) = blanks.get_mut(*index) else {
            continue;
        };

        let before = highlight_ids(order[..position].iter().rev(), highlights);
        let after = highlight_ids(order[position + 1..].iter(), highlights);

        tracing::trace!(
            id = %blank.id,
            before = before.len(),
            after = after.len(),
            "linked highlights"
        );
        blank.link_highlights(before, after);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture(order: &[ElementRef]) -> (Vec<Highlight>, Vec<Blank>) {
        let mut highlights = Vec::new();
        let mut blanks = Vec::new();
        for element in order {
            match element {
                ElementRef::Highlight(i) => highlights.push(Highlight::new(format!("h{}", i), *i)),
                ElementRef::Blank(i) => blanks.push(Blank::default().instantiate(*i)),
            }
        }
        (highlights, blanks)
    }

    #[test]
    fn test_link_nearest_first() {
        let order = vec![
            ElementRef::Highlight(0),
            ElementRef::Highlight(1),
            ElementRef::Blank(0),
            ElementRef::Highlight(2),
            ElementRef::Highlight(3),
        ];
        let (highlights, mut blanks) = fixture(&order);

        link_highlights(&order, &highlights, &mut blanks);

        assert_eq!(blanks[0].highlights_before, vec!["highlight_1", "highlight_0"]);
        assert_eq!(blanks[0].highlights_after, vec!["highlight_2", "highlight_3"]);
    }

    #[test]
    fn test_link_skips_other_blanks() {
        let order = vec![
            ElementRef::Highlight(0),
            ElementRef::Blank(0),
            ElementRef::Highlight(1),
            ElementRef::Blank(1),
        ];
        let (highlights, mut blanks) = fixture(&order);

        link_highlights(&order, &highlights, &mut blanks);

        assert_eq!(blanks[0].highlights_before, vec!["highlight_0"]);
        assert_eq!(blanks[0].highlights_after, vec!["highlight_1"]);
        assert_eq!(blanks[1].highlights_before, vec!["highlight_1", "highlight_0"]);
        assert!(blanks[1].highlights_after.is_empty());
    }

    #[test]
    fn test_link_without_highlights() {
        let order = vec![ElementRef::Blank(0), ElementRef::Blank(1)];
        let (highlights, mut blanks) = fixture(&order);

        link_highlights(&order, &highlights, &mut blanks);

        assert!(blanks.iter().all(|b| b.highlights_before.is_empty()));
        assert!(blanks.iter().all(|b| b.highlights_after.is_empty()));
    }
}
