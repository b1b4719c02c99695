//! Cloze module - Turn authored markup into anchored exercise elements
//!
//! Markers recognized in authored HTML:
//! - `___` (three or more underscores): a blank
//! - `!!text!!` (1-40 characters): a highlight

pub mod element;
pub mod link;
pub mod lint;
pub mod media;
pub mod model;
pub mod normalize;
pub mod scan;

pub use element::{Blank, ClozeElement, ElementKind, ElementRef, Highlight};
pub use media::{MediaElement, MediaType};
pub use model::{Cloze, ScanDiagnostics};
