//! Export — write a resource's properties as N-Triples or JSON.
//!
//! ```text
//! ResourceProperties → write_ntriples() → <s> <p> <o> . lines
//!                    → write_json()     → { "uri": ..., "properties": [...] }
//! ```
//!
//! A record's value is written as an IRI when the record declares an
//! `rdf_type` (the value is then a typed resource) and as a plain literal
//! otherwise. URIs are written as given; nothing is validated.

use std::io::{Read, Write};

use crate::model::*;
use crate::vocab::{rdf, rdfs};
use crate::{Error, Result};

/// Knobs for the exporters. Everything is off by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Indent JSON output.
    pub pretty: bool,
    /// Also write `<value> rdf:type <rdf_type>` for typed values.
    pub type_triples: bool,
    /// Also write `rdfs:label` and `rdfs:domain` triples about each relation.
    pub schema_triples: bool,
    /// Skip records without relation or value instead of failing.
    pub skip_incomplete: bool,
}

/// Write every property of `resource` as N-Triples. Returns the number of
/// lines written.
pub fn write_ntriples(
    resource: &ResourceProperties,
    writer: &mut dyn Write,
    options: &ExportOptions,
) -> Result<usize> {
    let subject = format_iri(resource.uri());
    let mut lines = 0;

    for record in resource {
        // Empty strings count as absent here, as they do for record identity.
        let (value, relation, rdf_type) = record.identity();
        let (relation, value) = match (relation, value) {
            (Some(r), Some(v)) => (r, v),
            (relation, _) => {
                let field = if relation.is_none() { "relation" } else { "value" };
                if options.skip_incomplete {
                    tracing::warn!(
                        uri = resource.uri(),
                        field,
                        property = %record,
                        "skipping incomplete property"
                    );
                    continue;
                }
                return Err(Error::MissingField { uri: resource.uri().to_owned(), field });
            }
        };

        let object = match rdf_type {
            Some(_) => format_iri(value),
            None => format_literal(value, None),
        };
        writeln!(writer, "{} {} {} .", subject, format_iri(relation), object)?;
        lines += 1;

        if options.type_triples {
            if let Some(rdf_type) = rdf_type {
                let predicate = format_iri(rdf::TYPE);
                writeln!(writer, "{} {} {} .", format_iri(value), predicate, format_iri(rdf_type))?;
                lines += 1;
            }
        }

        if options.schema_triples {
            lines += write_schema(writer, relation, record)?;
        }
    }

    tracing::debug!(uri = resource.uri(), lines, "wrote n-triples");
    Ok(lines)
}

/// Labels and domain of the relation itself. Sorted by language so output is
/// reproducible.
fn write_schema(
    writer: &mut dyn Write,
    relation: &str,
    record: &PropertyRecord,
) -> Result<usize> {
    let subject = format_iri(relation);
    let mut lines = 0;
    let mut labels: Vec<(&String, &String)> = record.labels().iter().collect();
    labels.sort();
    for (lang, text) in labels {
        let lang = (lang != NO_LANGUAGE).then_some(lang.as_str());
        let object = format_literal(text, lang);
        writeln!(writer, "{} {} {} .", subject, format_iri(rdfs::LABEL), object)?;
        lines += 1;
    }
    if let Some(domain) = record.domain().filter(|d| !d.is_empty()) {
        writeln!(writer, "{} {} {} .", subject, format_iri(rdfs::DOMAIN), format_iri(domain))?;
        lines += 1;
    }
    Ok(lines)
}

/// Serialize `resource` as JSON.
pub fn write_json(
    resource: &ResourceProperties,
    writer: &mut dyn Write,
    options: &ExportOptions,
) -> Result<()> {
    if options.pretty {
        serde_json::to_writer_pretty(&mut *writer, resource)?;
    } else {
        serde_json::to_writer(&mut *writer, resource)?;
    }
    tracing::debug!(uri = resource.uri(), properties = resource.len(), "wrote json");
    Ok(())
}

/// Read a resource back from JSON. Duplicate records in the input are merged
/// the same way [`ResourceProperties::add_property`] merges them.
pub fn read_json(reader: &mut dyn Read) -> Result<ResourceProperties> {
    Ok(serde_json::from_reader(reader)?)
}

fn format_iri(iri: &str) -> String {
    format!("<{}>", iri)
}

fn format_literal(text: &str, lang: Option<&str>) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(c),
        }
    }
    match lang {
        Some(lang) => format!("\"{}\"@{}", escaped, lang),
        None => format!("\"{}\"", escaped),
    }
}
