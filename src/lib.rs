//! clozer - cloze markup linearization and cross-referencing
//!
//! clozer provides:
//! - Blank marker normalization (`___`, `_____`, ... become one blank)
//! - Interleaved scanning of blank and `!!highlight!!` markers into anchors
//! - Linking every blank to the highlights around it
//! - A unified result model rendered as jsonl/json/md/raw
//!
//! ```
//! use clozer::cloze::{Blank, Cloze};
//!
//! let templates = vec![Blank::new(vec!["Paris".to_string()])];
//! let cloze = Cloze::create("!!France!!: capital is ___.", &templates, Vec::new());
//!
//! assert_eq!(
//!     cloze.html,
//!     "<span id='container_highlight_0'></span>: capital is <span id='container_blank_0'></span>."
//! );
//! assert_eq!(cloze.blanks[0].highlights_before, vec!["highlight_0"]);
//! ```

pub mod cloze;
pub mod core;
