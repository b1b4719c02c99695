//! Core module - Contains the result model and the I/O around the cloze engine
//!
//! This module provides:
//! - Unified result model (ResultItem)
//! - Rendering functions for different output formats
//! - Loading of markup, answer templates and media

pub mod input;
pub mod model;
pub mod render;
