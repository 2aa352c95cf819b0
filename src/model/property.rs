//! PropertyRecord — a relation/value pair on an ontology resource, with labels.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use super::labels::{LabelList, LabelMap};

/// A semantic property: `relation` links some resource of type `domain` to
/// `value`, optionally typed by `rdf_type`. Each identifier may carry
/// human-readable labels.
///
/// Identity is `(value, relation, rdf_type)` only. The domain and every label
/// collection are annotations: two records that differ only there compare
/// equal and hash the same. An absent identity field is indistinguishable
/// from an empty string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PropertyRecord {
    /// Type of the range, e.g. `http://example.org/vocab#Variety`.
    rdf_type: Option<String>,
    rdf_type_labels: LabelList,
    /// Relation name, e.g. `http://example.org/vocab#hasVariety`.
    relation: Option<String>,
    relation_labels: LabelList,
    /// Literal (a plot alias) or resource URI (a variety).
    value: Option<String>,
    value_labels: LabelList,
    /// Single class for now; unions may come later.
    domain: Option<String>,
    labels: LabelMap,
}

impl PropertyRecord {
    /// Empty record: no scalars, no labels.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from all of its parts. The collections are moved in as-is.
    #[allow(clippy::too_many_arguments)]
    pub fn with_all(
        rdf_type: Option<String>,
        rdf_type_labels: LabelList,
        relation: Option<String>,
        relation_labels: LabelList,
        value: Option<String>,
        value_labels: LabelList,
        domain: Option<String>,
        labels: LabelMap,
    ) -> Self {
        Self {
            rdf_type,
            rdf_type_labels,
            relation,
            relation_labels,
            value,
            value_labels,
            domain,
            labels,
        }
    }

    pub fn with_rdf_type(mut self, rdf_type: impl Into<String>) -> Self {
        self.rdf_type = Some(rdf_type.into());
        self
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_label(mut self, language: impl Into<String>, label: impl Into<String>) -> Self {
        self.add_label(language, label);
        self
    }

    // ========================================================================
    // Scalars
    // ========================================================================

    pub fn rdf_type(&self) -> Option<&str> {
        self.rdf_type.as_deref()
    }

    pub fn set_rdf_type(&mut self, rdf_type: Option<String>) {
        self.rdf_type = rdf_type;
    }

    pub fn relation(&self) -> Option<&str> {
        self.relation.as_deref()
    }

    pub fn set_relation(&mut self, relation: Option<String>) {
        self.relation = relation;
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn set_value(&mut self, value: Option<String>) {
        self.value = value;
    }

    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    pub fn set_domain(&mut self, domain: Option<String>) {
        self.domain = domain;
    }

    // ========================================================================
    // Language-keyed labels
    // ========================================================================

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    pub fn labels_mut(&mut self) -> &mut LabelMap {
        &mut self.labels
    }

    pub fn set_labels(&mut self, labels: LabelMap) {
        self.labels = labels;
    }

    /// Record `label` for `language`, replacing any previous one.
    /// Use [`NO_LANGUAGE`](super::NO_LANGUAGE) for untagged labels.
    pub fn add_label(&mut self, language: impl Into<String>, label: impl Into<String>) {
        self.labels.insert(language.into(), label.into());
    }

    pub fn label(&self, language: &str) -> Option<&str> {
        self.labels.get(language).map(String::as_str)
    }

    pub fn has_label(&self, language: &str) -> bool {
        self.labels.contains_key(language)
    }

    // ========================================================================
    // rdf_type labels
    // ========================================================================

    pub fn rdf_type_labels(&self) -> &LabelList {
        &self.rdf_type_labels
    }

    pub fn rdf_type_labels_mut(&mut self) -> &mut LabelList {
        &mut self.rdf_type_labels
    }

    pub fn set_rdf_type_labels(&mut self, labels: LabelList) {
        self.rdf_type_labels = labels;
    }

    pub fn add_first_rdf_type_label(&mut self, label: impl Into<String>) {
        self.rdf_type_labels.push_front(label.into());
    }

    pub fn add_last_rdf_type_label(&mut self, label: impl Into<String>) {
        self.rdf_type_labels.push_back(label.into());
    }

    pub fn add_rdf_type_labels<I>(&mut self, labels: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.rdf_type_labels.extend(labels.into_iter().map(Into::into));
    }

    // ========================================================================
    // relation labels
    // ========================================================================

    pub fn relation_labels(&self) -> &LabelList {
        &self.relation_labels
    }

    pub fn relation_labels_mut(&mut self) -> &mut LabelList {
        &mut self.relation_labels
    }

    pub fn set_relation_labels(&mut self, labels: LabelList) {
        self.relation_labels = labels;
    }

    pub fn add_first_relation_label(&mut self, label: impl Into<String>) {
        self.relation_labels.push_front(label.into());
    }

    pub fn add_last_relation_label(&mut self, label: impl Into<String>) {
        self.relation_labels.push_back(label.into());
    }

    pub fn add_relation_labels<I>(&mut self, labels: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.relation_labels.extend(labels.into_iter().map(Into::into));
    }

    // ========================================================================
    // value labels
    // ========================================================================

    pub fn value_labels(&self) -> &LabelList {
        &self.value_labels
    }

    pub fn value_labels_mut(&mut self) -> &mut LabelList {
        &mut self.value_labels
    }

    pub fn set_value_labels(&mut self, labels: LabelList) {
        self.value_labels = labels;
    }

    pub fn add_first_value_label(&mut self, label: impl Into<String>) {
        self.value_labels.push_front(label.into());
    }

    pub fn add_last_value_label(&mut self, label: impl Into<String>) {
        self.value_labels.push_back(label.into());
    }

    pub fn add_value_labels<I>(&mut self, labels: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.value_labels.extend(labels.into_iter().map(Into::into));
    }

    // ========================================================================
    // Identity
    // ========================================================================

    /// `(value, relation, rdf_type)` with empty strings folded into `None`.
    pub fn identity(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        (
            non_empty(&self.value),
            non_empty(&self.relation),
            non_empty(&self.rdf_type),
        )
    }

    /// Stable 32-bit identity code: the 31-polynomial string hash over the
    /// UTF-16 units of `value + relation + rdf_type` (absent fields as `""`).
    ///
    /// Same across processes and builds, unlike `std`'s randomly seeded
    /// hashers. Field boundaries are not marked, so `("ab", "c")` and
    /// `("a", "bc")` collide.
    pub fn identity_hash(&self) -> i32 {
        self.identity_key()
            .encode_utf16()
            .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(i32::from(unit)))
    }

    fn identity_key(&self) -> String {
        let mut key = String::new();
        key.push_str(or_empty(&self.value));
        key.push_str(or_empty(&self.relation));
        key.push_str(or_empty(&self.rdf_type));
        key
    }
}

fn or_empty(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}

fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

impl PartialEq for PropertyRecord {
    fn eq(&self, other: &Self) -> bool {
        or_empty(&self.value) == or_empty(&other.value)
            && or_empty(&self.rdf_type) == or_empty(&other.rdf_type)
            && or_empty(&self.relation) == or_empty(&other.relation)
    }
}

impl Eq for PropertyRecord {}

impl Hash for PropertyRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity_key().hash(state);
    }
}

impl fmt::Display for PropertyRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (value, relation, rdf_type) = self.identity();
        write!(f, "{} {}", relation.unwrap_or("_"), value.unwrap_or("_"))?;
        if let Some(t) = rdf_type {
            write!(f, " ^^{t}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NO_LANGUAGE;
    use std::hash::DefaultHasher;

    fn std_hash(p: &PropertyRecord) -> u64 {
        let mut h = DefaultHasher::new();
        p.hash(&mut h);
        h.finish()
    }

    fn variety() -> PropertyRecord {
        PropertyRecord::new()
            .with_value("V1")
            .with_relation("R1")
            .with_rdf_type("T1")
    }

    #[test]
    fn test_new_is_empty() {
        let p = PropertyRecord::new();
        assert_eq!(p.rdf_type(), None);
        assert_eq!(p.relation(), None);
        assert_eq!(p.value(), None);
        assert_eq!(p.domain(), None);
        assert!(p.labels().is_empty());
        assert!(p.rdf_type_labels().is_empty());
        assert!(p.relation_labels().is_empty());
        assert!(p.value_labels().is_empty());
    }

    #[test]
    fn test_add_label_last_write_wins() {
        let mut p = PropertyRecord::new();
        p.add_label("en", "Leaf");
        p.add_label("en", "Stem");
        assert_eq!(p.labels().len(), 1);
        assert_eq!(p.label("en"), Some("Stem"));
    }

    #[test]
    fn test_no_language_key_is_an_ordinary_entry() {
        let mut p = PropertyRecord::new();
        assert!(!p.has_label(NO_LANGUAGE));
        p.add_label(NO_LANGUAGE, "plot 12");
        assert_eq!(p.label(NO_LANGUAGE), Some("plot 12"));
        assert_eq!(p.label("en"), None);
    }

    #[test]
    fn test_front_and_back_insertion() {
        let mut p = PropertyRecord::new();
        p.add_first_rdf_type_label("b");
        p.add_first_rdf_type_label("a");
        assert_eq!(*p.rdf_type_labels(), ["a", "b"]);
        p.add_last_rdf_type_label("c");
        assert_eq!(*p.rdf_type_labels(), ["a", "b", "c"]);
    }

    #[test]
    fn test_bulk_append_keeps_duplicates() {
        let mut p = PropertyRecord::new();
        p.add_last_value_label("x");
        p.add_value_labels(["y", "x", "y"]);
        assert_eq!(*p.value_labels(), ["x", "y", "x", "y"]);
    }

    #[test]
    fn test_label_sequences_are_independent() {
        let mut p = PropertyRecord::new();
        p.add_last_relation_label("has variety");
        p.add_first_value_label("Apache");
        p.add_rdf_type_labels(vec![String::from("Variety")]);
        assert_eq!(*p.relation_labels(), ["has variety"]);
        assert_eq!(*p.value_labels(), ["Apache"]);
        assert_eq!(*p.rdf_type_labels(), ["Variety"]);
    }

    #[test]
    fn test_equality_ignores_domain_and_labels() {
        let a = variety().with_domain("D1").with_label("en", "Leaf");
        let mut b = variety().with_domain("D2").with_label("fr", "Feuille");
        b.add_last_value_label("other");
        assert_eq!(a, b);
        assert_eq!(std_hash(&a), std_hash(&b));
        assert_eq!(a.identity_hash(), b.identity_hash());
    }

    #[test]
    fn test_absent_and_empty_string_collide() {
        let absent = PropertyRecord::new().with_relation("R1").with_rdf_type("T1");
        let empty = absent.clone().with_value("");
        assert_eq!(absent.value(), None);
        assert_eq!(empty.value(), Some(""));
        assert_eq!(absent, empty);
        assert_eq!(std_hash(&absent), std_hash(&empty));
        assert_eq!(absent.identity_hash(), empty.identity_hash());
    }

    #[test]
    fn test_absent_never_equals_non_empty() {
        let a = PropertyRecord::new().with_relation("R1");
        let b = a.clone().with_value("V1");
        assert_ne!(a, b);
        assert_ne!(b, a);
    }

    #[test]
    fn test_each_identity_field_counts() {
        let base = variety();
        assert_ne!(base, variety().with_value("V2"));
        assert_ne!(base, variety().with_relation("R2"));
        assert_ne!(base, variety().with_rdf_type("T2"));
    }

    #[test]
    fn test_boundary_collision_is_preserved() {
        let a = PropertyRecord::new().with_value("ab").with_relation("c");
        let b = PropertyRecord::new().with_value("a").with_relation("bc");
        assert_ne!(a, b);
        assert_eq!(a.identity_hash(), b.identity_hash());
        assert_eq!(std_hash(&a), std_hash(&b));
    }

    #[test]
    fn test_identity_hash_matches_string_polynomial() {
        // "ab" = 97 * 31 + 98
        let p = PropertyRecord::new().with_value("a").with_relation("b");
        assert_eq!(p.identity_hash(), 3105);
        assert_eq!(PropertyRecord::new().identity_hash(), 0);
    }

    #[test]
    fn test_identity_folds_empty() {
        let p = PropertyRecord::new().with_value("").with_relation("R1");
        assert_eq!(p.identity(), (None, Some("R1"), None));
    }

    #[test]
    fn test_with_all_moves_collections() {
        let mut labels = LabelMap::new();
        labels.insert("en".into(), "variety".into());
        let p = PropertyRecord::with_all(
            Some("T1".into()),
            LabelList::from(vec!["Variety".to_owned()]),
            Some("R1".into()),
            LabelList::new(),
            Some("V1".into()),
            LabelList::from(vec!["Apache".to_owned()]),
            Some("D1".into()),
            labels,
        );
        assert_eq!(p, variety());
        assert_eq!(p.domain(), Some("D1"));
        assert_eq!(p.label("en"), Some("variety"));
        assert_eq!(*p.value_labels(), ["Apache"]);
    }

    #[test]
    fn test_setters_replace() {
        let mut p = variety();
        p.set_value(None);
        p.set_relation(Some("R2".into()));
        p.set_rdf_type(None);
        p.set_domain(Some("D9".into()));
        assert_eq!(p.value(), None);
        assert_eq!(p.relation(), Some("R2"));
        assert_eq!(p.rdf_type(), None);
        assert_eq!(p.domain(), Some("D9"));
        assert_eq!(p, PropertyRecord::new().with_relation("R2"));

        p.add_last_rdf_type_label("old");
        p.set_rdf_type_labels(LabelList::from(vec!["t".to_owned()]));
        p.set_relation_labels(LabelList::from(vec!["r".to_owned()]));
        p.set_value_labels(LabelList::from(vec!["v1".to_owned(), "v2".to_owned()]));
        assert_eq!(*p.rdf_type_labels(), ["t"]);
        assert_eq!(*p.relation_labels(), ["r"]);
        assert_eq!(*p.value_labels(), ["v1", "v2"]);

        p.add_label("en", "old");
        let mut labels = LabelMap::new();
        labels.insert("fr".into(), "nouveau".into());
        p.set_labels(labels);
        assert_eq!(p.label("en"), None);
        assert_eq!(p.label("fr"), Some("nouveau"));
        assert_eq!(p.labels().len(), 1);
    }

    #[test]
    fn test_display() {
        assert_eq!(variety().to_string(), "R1 V1 ^^T1");
        assert_eq!(PropertyRecord::new().to_string(), "_ _");
    }

    #[test]
    fn test_serde_camel_case() {
        let p = variety().with_label("en", "Leaf");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["rdfType"], "T1");
        assert_eq!(json["relation"], "R1");
        assert_eq!(json["domain"], serde_json::Value::Null);
        assert_eq!(json["labels"]["en"], "Leaf");
        assert!(json["rdfTypeLabels"].as_array().unwrap().is_empty());

        let json = r#"{"value":"V1","relation":"R1","rdfType":"T1"}"#;
        let back: PropertyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(back, p);
        assert!(back.labels().is_empty());
    }
}
