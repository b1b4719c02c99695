//! Input loading
//!
//! Reads authored markup plus the JSON files holding answer templates and
//! media. Provides consistent handling for:
//! - Non-UTF-8 markup
//! - Oversized files
//! - Binary files

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::cloze::{Blank, MediaElement};

/// Default maximum markup size in bytes (8 MB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 8 * 1024 * 1024;

/// Errors raised while loading input files
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} exceeds size limit ({size} > {limit} bytes)", .path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{} appears to be binary (contains null bytes)", .path.display())]
    Binary { path: PathBuf },

    #[error("{} contains invalid UTF-8", .path.display())]
    Encoding { path: PathBuf },
}

/// Strategy for handling non-UTF-8 markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodingStrategy {
    /// Refuse non-UTF-8 input
    Strict,
    /// Replace invalid bytes with U+FFFD
    #[default]
    Lossy,
}

/// Configuration for reading markup
#[derive(Debug, Clone, Copy)]
pub struct InputConfig {
    pub max_file_size: u64,
    pub encoding_strategy: EncodingStrategy,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            encoding_strategy: EncodingStrategy::Lossy,
        }
    }
}

/// Markup read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markup {
    pub content: String,

    /// Whether invalid UTF-8 was replaced
    pub lossy_conversion: bool,
}

/// Read authored markup
pub fn read_markup(path: &Path, config: &InputConfig) -> Result<Markup, InputError> {
    let io_error = |source| InputError::Io {
        path: path.to_path_buf(),
        source,
    };

    let size = fs::metadata(path).map_err(io_error)?.len();
    if size > config.max_file_size {
        return Err(InputError::TooLarge {
            path: path.to_path_buf(),
            size,
            limit: config.max_file_size,
        });
    }

    let bytes = fs::read(path).map_err(io_error)?;

    // Check if binary (contains null bytes in first 8KB)
    let check_len = std::cmp::min(8192, bytes.len());
    if bytes[..check_len].contains(&0) {
        return Err(InputError::Binary {
            path: path.to_path_buf(),
        });
    }

    match String::from_utf8(bytes) {
        Ok(content) => Ok(Markup {
            content,
            lossy_conversion: false,
        }),
        Err(err) => match config.encoding_strategy {
            EncodingStrategy::Strict => Err(InputError::Encoding {
                path: path.to_path_buf(),
            }),
            EncodingStrategy::Lossy => {
                tracing::warn!(path = %path.display(), "invalid UTF-8 replaced in markup");
                Ok(Markup {
                    content: String::from_utf8_lossy(err.as_bytes()).into_owned(),
                    lossy_conversion: true,
                })
            }
        },
    }
}

/// One entry of an answers file
///
/// Accepts a single answer, a list of accepted answers, or a full blank.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum BlankSpec {
    Answer(String),
    Answers(Vec<String>),
    Full(Blank),
}

impl From<BlankSpec> for Blank {
    fn from(spec: BlankSpec) -> Self {
        match spec {
            BlankSpec::Answer(answer) => Blank::new(vec![answer]),
            BlankSpec::Answers(answers) => Blank::new(answers),
            BlankSpec::Full(blank) => blank,
        }
    }
}

fn read_text(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    serde_json::from_str(&read_text(path)?).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse answer templates from JSON text
pub fn parse_blanks(json: &str) -> Result<Vec<Blank>, serde_json::Error> {
    let specs: Vec<BlankSpec> = serde_json::from_str(json)?;
    Ok(specs.into_iter().map(Blank::from).collect())
}

/// Load answer templates, in document order
pub fn load_blanks(path: &Path) -> Result<Vec<Blank>, InputError> {
    parse_blanks(&read_text(path)?).map_err(|source| InputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load media elements
pub fn load_media(path: &Path) -> Result<Vec<MediaElement>, InputError> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_read_markup_utf8() {
        let file = temp_file("Capital: ___".as_bytes());
        let markup = read_markup(file.path(), &InputConfig::default()).unwrap();
        assert_eq!(markup.content, "Capital: ___");
        assert!(!markup.lossy_conversion);
    }

    #[test]
    fn test_read_markup_lossy() {
        let file = temp_file(b"caf\xe9 ___");
        let markup = read_markup(file.path(), &InputConfig::default()).unwrap();
        assert!(markup.lossy_conversion);
        assert!(markup.content.ends_with(" ___"));
    }

    #[test]
    fn test_read_markup_strict() {
        let file = temp_file(b"caf\xe9");
        let config = InputConfig {
            encoding_strategy: EncodingStrategy::Strict,
            ..Default::default()
        };
        let err = read_markup(file.path(), &config).unwrap_err();
        assert!(matches!(err, InputError::Encoding { .. }));
    }

    #[test]
    fn test_read_markup_binary() {
        let file = temp_file(b"abc\0def");
        let err = read_markup(file.path(), &InputConfig::default()).unwrap_err();
        assert!(matches!(err, InputError::Binary { .. }));
    }

    #[test]
    fn test_read_markup_too_large() {
        let file = temp_file(b"0123456789");
        let config = InputConfig {
            max_file_size: 4,
            ..Default::default()
        };
        let err = read_markup(file.path(), &config).unwrap_err();
        assert!(err.to_string().contains("exceeds size limit"));
    }

    #[test]
    fn test_read_markup_missing() {
        let err = read_markup(Path::new("/nonexistent/cloze.html"), &InputConfig::default())
            .unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
    }

    #[test]
    fn test_parse_blanks_shorthands() {
        let blanks = parse_blanks(
            r#"["Paris", ["Berlin", "berlin"], {"correct_answers": ["Rome"], "hint": "Italy", "is_correct": true}]"#,
        )
        .unwrap();

        assert_eq!(blanks.len(), 3);
        assert_eq!(blanks[0].correct_answers, vec!["Paris"]);
        assert_eq!(blanks[1].correct_answers, vec!["Berlin", "berlin"]);
        assert_eq!(blanks[2].hint.as_deref(), Some("Italy"));
        assert_eq!(blanks[2].is_correct, Some(true));
    }

    #[test]
    fn test_load_blanks_shorthands() {
        let file = temp_file(br#"["Paris", {"correct_answers": ["Rome"], "is_correct": false}]"#);
        let blanks = load_blanks(file.path()).unwrap();

        assert_eq!(blanks.len(), 2);
        assert_eq!(blanks[0].correct_answers, vec!["Paris"]);
        assert_eq!(blanks[1].is_correct, Some(false));
    }

    #[test]
    fn test_load_blanks_invalid_json() {
        let file = temp_file(b"{not json");
        let err = load_blanks(file.path()).unwrap_err();
        assert!(matches!(err, InputError::Json { .. }));
    }

    #[test]
    fn test_load_media() {
        let file = temp_file(br#"[{"type":"audio","source":"a.mp3"}]"#);
        let media = load_media(file.path()).unwrap();
        assert_eq!(media.len(), 1);
        assert_eq!(media[0].source, "a.mp3");
    }
}
