//! Strategy trait definitions and error types.

use crate::model::SchemaDialect;
use thiserror::Error;

use super::xml::XmlDocument;

/// Errors that can occur while parsing a BOM document.
///
/// A well-formed document that no strategy recognizes is *not* an error;
/// it parses to an empty table.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("XML parse error at position {position}: {message}")]
    XmlError { position: u64, message: String },
}

impl From<std::io::Error> for ParseError {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err.to_string())
    }
}

/// Raw `(name, value)` pairs exactly as the dialect spells them.
pub type RawFields = Vec<(String, String)>;

/// One record as read by a strategy, before field resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Trimmed, non-empty designator; may still be compound (`R1-R5`)
    pub reference: String,
    pub fields: RawFields,
}

/// Records extracted by one strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub records: Vec<RawRecord>,
    /// Candidate records inspected, including skipped ones
    pub seen: usize,
    /// Candidates dropped for lack of a reference
    pub skipped: usize,
}

impl Extraction {
    /// Keep `record` if it has a reference, otherwise count it as skipped.
    pub fn push(&mut self, reference: &str, fields: RawFields) {
        self.seen += 1;
        let reference = reference.trim();
        if reference.is_empty() {
            self.skipped += 1;
        } else {
            self.records.push(RawRecord {
                reference: reference.to_string(),
                fields,
            });
        }
    }

    /// `Some(self)` if at least one record carried a reference.
    #[must_use]
    pub fn into_option(self) -> Option<Self> {
        if self.records.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// A single schema-recognition strategy.
///
/// Strategies are tried in order by the
/// [`StrategyCascade`](super::StrategyCascade); the first one returning
/// `Some` wins.
pub trait ParseStrategy: Send + Sync {
    /// Dialect this strategy recognizes.
    fn dialect(&self) -> SchemaDialect;

    /// Extract raw records, or `None` if no record carried a reference.
    fn extract(&self, document: &XmlDocument) -> Option<Extraction>;
}
