//! # Property Model
//!
//! The records that cross every boundary of an ontology-backed service:
//! query mappers build them, response serializers read them.
//!
//! Design rule: pure data. No I/O, no validation of URIs or language codes,
//! no locking.

pub mod labels;
pub mod property;
pub mod resource;

pub use labels::{LabelList, LabelMap, NO_LANGUAGE};
pub use property::PropertyRecord;
pub use resource::ResourceProperties;
