//! Ordered strategy cascade for dialect detection.
//!
//! Strategies are tried in a fixed order; each one only runs if every
//! earlier strategy found no referenced record. The first hit decides the
//! dialect of the whole document.

use super::generic::GenericComponentStrategy;
use super::heuristic::HeuristicStrategy;
use super::structured::StructuredStrategy;
use super::traits::{Extraction, ParseStrategy};
use super::xml::XmlDocument;
use crate::model::SchemaDialect;
use crate::normalize::FieldAliases;

/// Outcome of running the cascade over one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectionResult {
    /// Dialect of the winning strategy; `None` if nothing matched
    pub dialect: Option<SchemaDialect>,
    pub extraction: Extraction,
}

impl DetectionResult {
    /// No strategy produced a component.
    #[must_use]
    pub fn no_components(&self) -> bool {
        self.dialect.is_none()
    }
}

/// Runs [`ParseStrategy`] implementations in order until one matches.
pub struct StrategyCascade {
    strategies: Vec<Box<dyn ParseStrategy>>,
}

impl Default for StrategyCascade {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyCascade {
    /// Structured, then generic `Component`, then heuristic.
    #[must_use]
    pub fn new() -> Self {
        Self::with_aliases(FieldAliases::default())
    }

    /// Default cascade whose heuristic stage uses `aliases`.
    #[must_use]
    pub fn with_aliases(aliases: FieldAliases) -> Self {
        Self {
            strategies: vec![
                Box::new(StructuredStrategy),
                Box::new(GenericComponentStrategy),
                Box::new(HeuristicStrategy::new(aliases)),
            ],
        }
    }

    /// A cascade with an explicit strategy order.
    #[must_use]
    pub fn from_strategies(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self { strategies }
    }

    /// Dialects in the order they are tried.
    pub fn dialects(&self) -> impl Iterator<Item = SchemaDialect> + '_ {
        self.strategies.iter().map(|s| s.dialect())
    }

    /// Run the cascade over a parsed document.
    #[must_use]
    pub fn detect(&self, document: &XmlDocument) -> DetectionResult {
        for strategy in &self.strategies {
            let dialect = strategy.dialect();
            match strategy.extract(document) {
                Some(extraction) => {
                    tracing::debug!(
                        %dialect,
                        records = extraction.records.len(),
                        skipped = extraction.skipped,
                        "Strategy matched"
                    );
                    return DetectionResult {
                        dialect: Some(dialect),
                        extraction,
                    };
                }
                None => tracing::debug!(%dialect, "Strategy found no components"),
            }
        }
        DetectionResult::default()
    }
}
