//! Field selection and sort directives.

use mongodb::bson::{doc, Document};

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Fields named by `select=a,b`; `None` means no projection.
pub fn parse_field_selection(select: Option<&str>) -> Option<Vec<String>> {
    let fields = split_list(select?);
    (!fields.is_empty()).then_some(fields)
}

/// Sort keys from `sort=a,-b`, kept verbatim.
///
/// Without a usable `sort` the newest records come first, keyed on
/// `created_at_field`.
pub fn parse_sort(sort: Option<&str>, created_at_field: &str) -> Vec<String> {
    let keys = sort.map(split_list).unwrap_or_default();
    if keys.is_empty() {
        vec![format!("-{}", created_at_field)]
    } else {
        keys
    }
}

/// `{field: 1}` per selected field, `{field: 0}` for `-field`.
pub fn projection_document(fields: &[String]) -> Document {
    let mut projection = Document::new();
    for field in fields {
        match field.strip_prefix('-') {
            Some(excluded) if !excluded.is_empty() => {
                projection.insert(excluded, 0);
            }
            Some(_) => {}
            None => {
                projection.insert(field.as_str(), 1);
            }
        }
    }
    projection
}

/// Sort document where a leading `-` means descending.
pub fn sort_document(keys: &[String]) -> Document {
    let mut sort = doc! {};
    for key in keys {
        let (field, direction) = match key.strip_prefix('-') {
            Some(field) => (field, -1),
            None => (key.strip_prefix('+').unwrap_or(key), 1),
        };
        if !field.is_empty() {
            sort.insert(field, direction);
        }
    }
    sort
}
