//! # property-record — Ontology Property Records
//!
//! The value type an ontology-backed web service hands around when it
//! describes a resource: a relation, the value it points to, the value's
//! declared type, and human-readable labels for each.
//!
//! ## Design Principles
//!
//! 1. **Identity is the triple**: two `PropertyRecord`s are equal iff their
//!    value, relation and rdf_type match. Labels and domain never take part.
//! 2. **Pure data**: records do no I/O and validate nothing. Callers own
//!    language conventions and URI well-formedness.
//! 3. **Export at the edge**: N-Triples/JSON rendering lives in [`export`],
//!    the only place that can fail.
//!
//! ## Quick Start
//!
//! ```rust
//! use property_record::{PropertyRecord, ResourceProperties, NO_LANGUAGE};
//!
//! let mut variety = PropertyRecord::new()
//!     .with_relation("http://example.org/vocab#hasVariety")
//!     .with_value("http://example.org/varieties/apache")
//!     .with_rdf_type("http://example.org/vocab#Variety");
//! variety.add_label("en", "has variety");
//! variety.add_label(NO_LANGUAGE, "hasVariety");
//! variety.add_last_value_label("Apache");
//!
//! let mut plot = ResourceProperties::new("http://example.org/plots/p12");
//! assert!(plot.add_property(variety.clone()));
//! assert!(!plot.add_property(variety));
//! assert_eq!(plot.len(), 1);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod vocab;
pub mod export;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{
    PropertyRecord, ResourceProperties,
    LabelList, LabelMap, NO_LANGUAGE,
};

// ============================================================================
// Re-exports: Export
// ============================================================================

pub use export::ExportOptions;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Property of {uri} has no {field}")]
    MissingField { uri: String, field: &'static str },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
