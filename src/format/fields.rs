//! `--json` field projection.

use serde_json::{Map, Value as JsonValue};

/// Key under which list results carry their records.
pub const ITEMS_KEY: &str = "items";

/// Ordered field names parsed from a comma-separated list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldList(Vec<String>);

impl FieldList {
    /// Parse a comma-separated list, dropping empty names.
    ///
    /// - `"id,title"` → `["id", "title"]`
    /// - `"id,,url "` → `["id", "url"]`
    pub fn parse(input: &str) -> Self {
        FieldList(
            input
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Copy of `record` holding only the listed keys that it actually has.
    pub fn project_record(&self, record: &Map<String, JsonValue>) -> Map<String, JsonValue> {
        self.0
            .iter()
            .filter_map(|name| record.get(name).map(|v| (name.clone(), v.clone())))
            .collect()
    }

    /// Project every element of a sequence, wrapping the result under `items`.
    ///
    /// Elements that are not records become `null` so positions line up.
    fn project_sequence(&self, items: &[JsonValue]) -> JsonValue {
        let projected = items
            .iter()
            .map(|item| match item {
                JsonValue::Object(record) => JsonValue::Object(self.project_record(record)),
                _ => JsonValue::Null,
            })
            .collect();

        let mut wrapper = Map::new();
        wrapper.insert(ITEMS_KEY.to_string(), JsonValue::Array(projected));
        JsonValue::Object(wrapper)
    }

    /// Project a result value, returning a new value.
    pub fn project(&self, value: &JsonValue) -> JsonValue {
        match Shape::of(value) {
            Shape::Wrapper(items) | Shape::Sequence(items) => self.project_sequence(items),
            Shape::Record(record) => JsonValue::Object(self.project_record(record)),
            // Nothing to pick fields from
            Shape::Scalar(_) => JsonValue::Object(Map::new()),
        }
    }
}

/// The shapes a command result can take.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape<'a> {
    /// A record holding an `items` sequence. Envelope fields like `total`
    /// are not part of the shape.
    Wrapper(&'a [JsonValue]),
    /// A single record.
    Record(&'a Map<String, JsonValue>),
    /// A bare sequence.
    Sequence(&'a [JsonValue]),
    /// Anything else.
    Scalar(&'a JsonValue),
}

impl<'a> Shape<'a> {
    /// Classify a result value.
    pub fn of(value: &'a JsonValue) -> Self {
        match value {
            JsonValue::Object(map) => match map.get(ITEMS_KEY) {
                Some(JsonValue::Array(items)) => Shape::Wrapper(items),
                _ => Shape::Record(map),
            },
            JsonValue::Array(items) => Shape::Sequence(items),
            other => Shape::Scalar(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_field_list() {
        assert_eq!(FieldList::parse("id,title").names(), ["id", "title"]);
        assert_eq!(FieldList::parse("id,,url ").names(), ["id", "url"]);
        assert!(FieldList::parse("").is_empty());
        assert!(FieldList::parse(",,").is_empty());
    }

    #[test]
    fn test_shape_of() {
        let wrapper = json!({"total": 1, "items": [{"id": 1}]});
        assert!(matches!(
            Shape::of(&wrapper),
            Shape::Wrapper(items) if items.len() == 1
        ));
        assert!(matches!(Shape::of(&json!({"id": 1})), Shape::Record(_)));
        assert!(matches!(Shape::of(&json!([])), Shape::Sequence(_)));
        assert!(matches!(Shape::of(&json!(3)), Shape::Scalar(_)));
        // `items` that is not a sequence is just a field
        assert!(matches!(
            Shape::of(&json!({"items": "none"})),
            Shape::Record(_)
        ));
    }

    #[test]
    fn test_project_record_keeps_intersection() {
        let record = json!({"id": 5, "url": "http://x", "title": "X"});
        let fields = FieldList::parse("url,missing,id");
        assert_eq!(fields.project(&record), json!({"id": 5, "url": "http://x"}));
    }

    #[test]
    fn test_project_single_record_is_not_wrapped() {
        let record = json!({"id": 5, "url": "http://x"});
        assert_eq!(
            FieldList::parse("url").project(&record),
            json!({"url": "http://x"})
        );
    }

    #[test]
    fn test_project_sequence_wraps_items() {
        let seq = json!([
            {"id": 1, "title": "A", "url": "http://a"},
            {"id": 2, "title": "B"}
        ]);
        assert_eq!(
            FieldList::parse("id,url").project(&seq),
            json!({"items": [{"id": 1, "url": "http://a"}, {"id": 2}]})
        );
    }

    #[test]
    fn test_project_empty_sequence() {
        assert_eq!(
            FieldList::parse("id").project(&json!([])),
            json!({"items": []})
        );
    }

    #[test]
    fn test_project_wrapper_drops_envelope() {
        let result = json!({
            "total": 2,
            "items": [
                {"id": 1, "title": "A", "url": "http://a"},
                {"id": 2, "title": "B", "url": "http://b"}
            ]
        });
        assert_eq!(
            FieldList::parse("id,title").project(&result),
            json!({"items": [{"id": 1, "title": "A"}, {"id": 2, "title": "B"}]})
        );
    }

    #[test]
    fn test_project_non_record_elements_become_null() {
        let seq = json!([{"id": 1}, 7, "x"]);
        assert_eq!(
            FieldList::parse("id").project(&seq),
            json!({"items": [{"id": 1}, null, null]})
        );
    }

    // Scalars silently degrade to an empty record rather than failing.
    #[test]
    fn test_project_scalar_yields_empty_record() {
        assert_eq!(FieldList::parse("id").project(&json!(42)), json!({}));
        assert_eq!(FieldList::parse("id").project(&json!(null)), json!({}));
    }

    #[test]
    fn test_project_does_not_mutate_input() {
        let record = json!({"id": 1, "title": "A"});
        let before = record.clone();
        let _ = FieldList::parse("id").project(&record);
        assert_eq!(record, before);
    }
}
