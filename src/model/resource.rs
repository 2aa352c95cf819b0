//! ResourceProperties — every property attached to one subject URI.

use serde::{Deserialize, Serialize};

use super::labels::{merge_list, merge_map, LabelList, LabelMap};
use super::PropertyRecord;

/// The properties of a single resource, in first-insertion order.
///
/// No two stored records are equal under [`PropertyRecord`] identity. Adding a
/// record that is already present folds its labels into the stored one. This
/// holds for deserialized values too: input records go through
/// [`add_property`](Self::add_property).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "RawResource")]
pub struct ResourceProperties {
    uri: String,
    properties: Vec<PropertyRecord>,
    /// Identity-only copy of each stored record → its position in `properties`.
    #[serde(skip)]
    index: hashbrown::HashMap<PropertyRecord, usize>,
}

/// Wire shape; duplicates are allowed here and merged on conversion.
#[derive(Deserialize)]
struct RawResource {
    uri: String,
    #[serde(default)]
    properties: Vec<PropertyRecord>,
}

impl From<RawResource> for ResourceProperties {
    fn from(raw: RawResource) -> Self {
        let total = raw.properties.len();
        let mut resource = ResourceProperties::new(raw.uri);
        let added = resource.extend_properties(raw.properties);
        if added < total {
            tracing::debug!(
                uri = %resource.uri,
                merged = total - added,
                "merged duplicates on deserialize"
            );
        }
        resource
    }
}

/// A record carrying only value, relation and rdf_type.
fn identity_key(record: &PropertyRecord) -> PropertyRecord {
    PropertyRecord::with_all(
        record.rdf_type().map(str::to_owned),
        LabelList::new(),
        record.relation().map(str::to_owned),
        LabelList::new(),
        record.value().map(str::to_owned),
        LabelList::new(),
        None,
        LabelMap::new(),
    )
}

impl ResourceProperties {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            properties: Vec::new(),
            index: hashbrown::HashMap::new(),
        }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn properties(&self) -> &[PropertyRecord] {
        &self.properties
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PropertyRecord> {
        self.properties.iter()
    }

    /// Add `record`, or merge it into the equal record already held.
    ///
    /// Returns `true` when the record was new. On merge, languages and labels
    /// the stored record lacks are copied over and its domain is filled in if
    /// absent; nothing already stored is overwritten.
    pub fn add_property(&mut self, record: PropertyRecord) -> bool {
        let found = self.index.get(&record).copied();
        let Some(pos) = found else {
            tracing::trace!(uri = %self.uri, property = %record, "adding property");
            self.index.insert(identity_key(&record), self.properties.len());
            self.properties.push(record);
            return true;
        };

        let existing = &mut self.properties[pos];
        let mut added = merge_map(existing.labels_mut(), record.labels());
        added += merge_list(existing.rdf_type_labels_mut(), record.rdf_type_labels());
        added += merge_list(existing.relation_labels_mut(), record.relation_labels());
        added += merge_list(existing.value_labels_mut(), record.value_labels());
        if existing.domain().is_none() && record.domain().is_some() {
            existing.set_domain(record.domain().map(str::to_owned));
        }
        tracing::debug!(
            uri = %self.uri,
            property = %existing,
            labels_added = added,
            "merged duplicate property"
        );
        false
    }

    /// Add every record; returns how many were new.
    pub fn extend_properties<I>(&mut self, records: I) -> usize
    where
        I: IntoIterator<Item = PropertyRecord>,
    {
        let mut added = 0;
        for record in records {
            if self.add_property(record) {
                added += 1;
            }
        }
        added
    }

    pub fn contains(&self, record: &PropertyRecord) -> bool {
        self.index.contains_key(record)
    }

    /// The stored record equal to `record`, with its merged labels.
    pub fn get(&self, record: &PropertyRecord) -> Option<&PropertyRecord> {
        self.index.get(record).map(|&pos| &self.properties[pos])
    }

    /// Remove the record equal to `record`. Later records shift down by one.
    pub fn remove(&mut self, record: &PropertyRecord) -> Option<PropertyRecord> {
        let pos = self.index.remove(record)?;
        for i in self.index.values_mut() {
            if *i > pos {
                *i -= 1;
            }
        }
        Some(self.properties.remove(pos))
    }

    /// Distinct relations in first-seen order. Records without one are skipped.
    pub fn relations(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for rel in self.properties.iter().filter_map(PropertyRecord::relation) {
            if !seen.contains(&rel) {
                seen.push(rel);
            }
        }
        seen
    }

    pub fn with_relation<'a>(
        &'a self,
        relation: &'a str,
    ) -> impl Iterator<Item = &'a PropertyRecord> + 'a {
        self.properties.iter().filter(move |p| p.relation() == Some(relation))
    }
}

/// Same uri and the same records in the same order. The index follows from
/// `properties`.
impl PartialEq for ResourceProperties {
    fn eq(&self, other: &Self) -> bool {
        self.uri == other.uri && self.properties == other.properties
    }
}

impl<'a> IntoIterator for &'a ResourceProperties {
    type Item = &'a PropertyRecord;
    type IntoIter = std::slice::Iter<'a, PropertyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.properties.iter()
    }
}
