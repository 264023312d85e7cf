//! Query-string filters to MongoDB filter documents.
//!
//! `province=Bangkok` becomes an equality match and `created_at[gte]=2024-01-01`
//! becomes `{ "created_at": { "$gte": <date> } }`. Any other whole-word operator
//! token, in a field name or a value, gets the marker too, so `region=in` becomes
//! `{ "region": "$in" }` and `gte=5` becomes `{ "$gte": "5" }`. Tokens inside
//! longer words (`gtx`, `inside`) are left alone.

use std::borrow::Cow;
use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use regex::Regex;

use crate::constants::RESERVED_PARAMS;

use super::QueryParams;

/// Prefix MongoDB uses to mark query operators.
pub const OPERATOR_MARKER: char = '$';

lazy_static! {
    static ref OPERATOR_WORD: Regex = Regex::new(r"\b(gt|gte|lt|lte|in)\b").unwrap();
}

/// Prefix every whole-word operator token in `raw` with the marker.
pub fn mark_operator_words(raw: &str) -> Cow<'_, str> {
    OPERATOR_WORD.replace_all(raw, |caps: &regex::Captures| {
        format!("{}{}", OPERATOR_MARKER, &caps[1])
    })
}

/// Comparison operators accepted as bracket sub-keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterOperator {
    Gt,
    Gte,
    Lt,
    Lte,
    In,
}

impl FilterOperator {
    /// Exact token match; `gtx` or `GT` are not operators.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "gt" => Some(Self::Gt),
            "gte" => Some(Self::Gte),
            "lt" => Some(Self::Lt),
            "lte" => Some(Self::Lte),
            "in" => Some(Self::In),
            _ => None,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::In => "in",
        }
    }

    /// Token with the database operator marker, e.g. `$gte`.
    pub fn marker(self) -> String {
        format!("{}{}", OPERATOR_MARKER, self.token())
    }
}

/// Sub-key of a bracketed filter parameter such as `age[gte]`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum OperatorKey {
    Known(FilterOperator),
    Unknown(String),
}

impl OperatorKey {
    fn parse(token: &str) -> Self {
        FilterOperator::from_token(token)
            .map(Self::Known)
            .unwrap_or_else(|| Self::Unknown(mark_operator_words(token).into_owned()))
    }

    /// Key as it appears in the filter document.
    pub fn as_key(&self) -> String {
        match self {
            Self::Known(op) => op.marker(),
            Self::Unknown(raw) => raw.clone(),
        }
    }
}

/// Condition on a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Equals(String),
    Compare(BTreeMap<OperatorKey, Vec<String>>),
}

/// How a stored field is typed, so string filter values can be coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    DateTime,
    ObjectId,
}

impl FieldKind {
    /// Coerce a raw value; values that do not parse stay strings.
    pub fn coerce(self, raw: &str) -> Bson {
        match self {
            FieldKind::Text => Bson::String(raw.to_string()),
            FieldKind::DateTime => parse_datetime(raw)
                .map(|dt| Bson::DateTime(bson::DateTime::from_millis(dt.timestamp_millis())))
                .unwrap_or_else(|| Bson::String(raw.to_string())),
            FieldKind::ObjectId => ObjectId::parse_str(raw)
                .map(Bson::ObjectId)
                .unwrap_or_else(|_| Bson::String(raw.to_string())),
        }
    }
}

fn parse_datetime(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        })
}

/// Structured filter, one condition per field, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpression {
    fields: BTreeMap<String, Condition>,
}

impl FilterExpression {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn get(&self, field: &str) -> Option<&Condition> {
        self.fields.get(field)
    }

    pub fn contains_field(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Render as a MongoDB filter document.
    pub fn to_document(&self, kind_of: impl Fn(&str) -> FieldKind) -> Document {
        let mut document = Document::new();

        for (field, condition) in &self.fields {
            let kind = kind_of(field);
            let value = match condition {
                Condition::Equals(raw) => kind.coerce(raw),
                Condition::Compare(operators) => {
                    let mut inner = Document::new();
                    for (key, values) in operators {
                        inner.insert(key.as_key(), operator_value(key, values, kind));
                    }
                    Bson::Document(inner)
                }
            };
            document.insert(field.clone(), value);
        }

        document
    }
}

fn operator_value(key: &OperatorKey, values: &[String], kind: FieldKind) -> Bson {
    match key {
        OperatorKey::Known(FilterOperator::In) => Bson::Array(
            values
                .iter()
                .flat_map(|value| value.split(','))
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(|value| kind.coerce(value))
                .collect(),
        ),
        OperatorKey::Known(_) => values
            .last()
            .map(|value| kind.coerce(value))
            .unwrap_or(Bson::Null),
        OperatorKey::Unknown(_) => values
            .last()
            .map(|value| Bson::String(value.clone()))
            .unwrap_or(Bson::Null),
    }
}

/// Split `field[sub]` into `("field", Some("sub"))`.
fn split_bracket(name: &str) -> (&str, Option<&str>) {
    let Some(inner) = name.strip_suffix(']') else {
        return (name, None);
    };
    match inner.find('[') {
        Some(0) | None => (name, None),
        Some(open) => {
            let sub_key = &inner[open + 1..];
            (&name[..open], (!sub_key.is_empty()).then_some(sub_key))
        }
    }
}

/// Translate every non-reserved parameter into a field condition.
///
/// A plain `field=value` replaces anything given earlier for that field, while
/// bracketed forms accumulate. Names (or sub-keys) starting with `$` are dropped
/// before operator words are marked.
pub fn parse_filters(params: &QueryParams) -> FilterExpression {
    let mut fields: BTreeMap<String, Condition> = BTreeMap::new();

    for (name, value) in params.iter() {
        let (raw_field, sub_key) = split_bracket(name);

        if raw_field.is_empty()
            || raw_field.starts_with(OPERATOR_MARKER)
            || RESERVED_PARAMS.contains(&raw_field)
        {
            continue;
        }

        let field = mark_operator_words(raw_field);
        let value = mark_operator_words(value);

        match sub_key {
            None => {
                fields.insert(field.into_owned(), Condition::Equals(value.into_owned()));
            }
            Some(token) if token.starts_with(OPERATOR_MARKER) => {}
            Some(token) => {
                let entry = fields
                    .entry(field.into_owned())
                    .or_insert_with(|| Condition::Compare(BTreeMap::new()));
                if matches!(entry, Condition::Equals(_)) {
                    *entry = Condition::Compare(BTreeMap::new());
                }
                if let Condition::Compare(operators) = entry {
                    operators
                        .entry(OperatorKey::parse(token))
                        .or_default()
                        .push(value.into_owned());
                }
            }
        }
    }

    FilterExpression { fields }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::doc;

    fn params(pairs: &[(&'static str, &'static str)]) -> QueryParams {
        pairs.iter().copied().collect()
    }

    fn text(_: &str) -> FieldKind {
        FieldKind::Text
    }

    #[test]
    fn test_reserved_keys_never_become_filters() {
        let p = params(&[
            ("select", "name"),
            ("sort", "-name"),
            ("page", "2"),
            ("limit", "5"),
            ("page[gt]", "1"),
            ("limit[lte]", "9"),
            ("province", "Nonthaburi"),
        ]);
        let filter = parse_filters(&p);

        assert_eq!(filter.len(), 1);
        for reserved in RESERVED_PARAMS {
            assert!(!filter.contains_field(reserved));
        }
        assert_eq!(filter.to_document(text), doc! { "province": "Nonthaburi" });
    }

    #[test]
    fn test_operator_tokens_are_rewritten() {
        let p = params(&[
            ("age[gte]", "30"),
            ("age[lt]", "60"),
            ("score[gt]", "1"),
            ("score[lte]", "9"),
        ]);
        let document = parse_filters(&p).to_document(text);

        assert_eq!(
            document,
            doc! {
                "age": { "$gte": "30", "$lt": "60" },
                "score": { "$gt": "1", "$lte": "9" },
            }
        );
    }

    #[test]
    fn test_operator_lookalikes_are_left_untouched() {
        let p = params(&[("age[gtx]", "5"), ("age[GTE]", "7"), ("name[inside]", "x")]);
        let document = parse_filters(&p).to_document(text);

        assert_eq!(
            document,
            doc! {
                "age": { "GTE": "7", "gtx": "5" },
                "name": { "inside": "x" },
            }
        );
    }

    #[test]
    fn test_operator_words_in_names_and_values_are_marked() {
        let p = params(&[
            ("region", "in"),
            ("gte", "5"),
            ("name", "Hospital in Bangkok"),
            ("district", "inside the gtx"),
        ]);
        assert_eq!(
            parse_filters(&p).to_document(text),
            doc! {
                "$gte": "5",
                "district": "inside the gtx",
                "name": "Hospital $in Bangkok",
                "region": "$in",
            }
        );
    }

    #[test]
    fn test_operator_words_inside_in_lists_are_marked() {
        let p = params(&[("region[in]", "north,lt")]);
        assert_eq!(
            parse_filters(&p).to_document(text),
            doc! { "region": { "$in": ["north", "$lt"] } }
        );
    }

    #[test]
    fn test_mark_operator_words() {
        assert_eq!(mark_operator_words("lte"), "$lte");
        assert_eq!(mark_operator_words("a gt b"), "a $gt b");
        assert_eq!(mark_operator_words("gtx ingest"), "gtx ingest");
    }

    #[test]
    fn test_in_collects_repeated_and_comma_separated_values() {
        let p = params(&[("region[in]", "north, south"), ("region[in]", "east")]);
        assert_eq!(
            parse_filters(&p).to_document(text),
            doc! { "region": { "$in": ["north", "south", "east"] } }
        );
    }

    #[test]
    fn test_dollar_keys_are_discarded() {
        let p = params(&[("$where", "1"), ("name[$ne]", "x"), ("tel", "02")]);
        assert_eq!(parse_filters(&p).to_document(text), doc! { "tel": "02" });
    }

    #[test]
    fn test_plain_value_replaces_earlier_comparison() {
        let p = params(&[("age[gt]", "1"), ("age", "5")]);
        assert_eq!(
            parse_filters(&p).get("age"),
            Some(&Condition::Equals("5".to_string()))
        );

        let p = params(&[("age", "5"), ("age[gt]", "1")]);
        assert_eq!(
            parse_filters(&p).to_document(text),
            doc! { "age": { "$gt": "1" } }
        );
    }

    #[test]
    fn test_malformed_brackets_are_plain_fields() {
        let p = params(&[("name[", "a"), ("[gt]", "b"), ("tags[]", "c")]);
        assert_eq!(
            parse_filters(&p).to_document(text),
            doc! { "[$gt]": "b", "name[": "a", "tags": "c" }
        );
    }

    #[test]
    fn test_values_are_coerced_by_field_kind() {
        let id = ObjectId::new();
        let id_hex = id.to_hex();
        let p: QueryParams = vec![
            ("created_at[gte]".to_string(), "2024-01-01".to_string()),
            ("hospital".to_string(), id_hex),
            ("user".to_string(), "not-an-id".to_string()),
        ]
        .into();

        let document = parse_filters(&p).to_document(|field| match field {
            "created_at" => FieldKind::DateTime,
            _ => FieldKind::ObjectId,
        });

        let expected_date = bson::DateTime::from_millis(1_704_067_200_000);
        assert_eq!(
            document,
            doc! {
                "created_at": { "$gte": expected_date },
                "hospital": id,
                "user": "not-an-id",
            }
        );
    }

    #[test]
    fn test_rfc3339_datetime_coercion() {
        let value = FieldKind::DateTime.coerce("2024-01-01T07:00:00+07:00");
        assert_eq!(
            value,
            Bson::DateTime(bson::DateTime::from_millis(1_704_067_200_000))
        );
        assert_eq!(
            FieldKind::DateTime.coerce("yesterday"),
            Bson::String("yesterday".to_string())
        );
    }

    #[test]
    fn test_translation_is_idempotent() {
        let p = params(&[("age[gte]", "30"), ("region[in]", "a,b"), ("name", "x")]);
        let first = parse_filters(&p);
        let second = parse_filters(&p);

        assert_eq!(first, second);
        assert_eq!(first.to_document(text), second.to_document(text));
    }

    #[test]
    fn test_operator_markers() {
        assert_eq!(FilterOperator::Gte.marker(), "$gte");
        assert_eq!(FilterOperator::In.marker(), "$in");
        assert_eq!(FilterOperator::from_token("lte"), Some(FilterOperator::Lte));
        assert_eq!(FilterOperator::from_token("gtx"), None);
    }
}
