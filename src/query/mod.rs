//! List-query translation.
//!
//! Turns the raw query-string pairs of a listing request into the pieces a
//! repository needs: a filter document, an optional projection, a sort
//! document and a page window. Everything here is pure; the only external
//! input is the record count the repository reports back.

pub mod filter;
pub mod pagination;
pub mod projection;

pub use filter::{parse_filters, Condition, FieldKind, FilterExpression, FilterOperator, OperatorKey};
pub use pagination::{compute_pagination, PageLink, Pagination, PaginationState};
pub use projection::{parse_field_selection, parse_sort, projection_document, sort_document};

use mongodb::bson::Document;

use crate::constants::{PARAM_LIMIT, PARAM_PAGE, PARAM_SELECT, PARAM_SORT};

/// An entity type that can be listed through the query translator.
pub trait Listable {
    /// Stored name of the creation timestamp, used for the default sort.
    const CREATED_AT_FIELD: &'static str;

    /// Storage kind of a field, used to coerce filter values.
    fn field_kind(_field: &str) -> FieldKind {
        FieldKind::Text
    }
}

/// Raw query-string pairs in the order they were received.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self(pairs)
    }

    /// First value supplied for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<Vec<(String, String)>> for QueryParams {
    fn from(pairs: Vec<(String, String)>) -> Self {
        Self::new(pairs)
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// A fully translated listing request.
#[derive(Debug, Clone, PartialEq)]
pub struct ListQuery {
    pub filter: Document,
    pub fields: Option<Vec<String>>,
    pub sort: Vec<String>,
    page: Option<String>,
    limit: Option<String>,
}

impl ListQuery {
    /// Translate `params` for entity type `E`.
    pub fn parse<E: Listable>(params: &QueryParams) -> Self {
        Self {
            filter: parse_filters(params).to_document(E::field_kind),
            fields: parse_field_selection(params.get(PARAM_SELECT)),
            sort: parse_sort(params.get(PARAM_SORT), E::CREATED_AT_FIELD),
            page: params.get(PARAM_PAGE).map(str::to_string),
            limit: params.get(PARAM_LIMIT).map(str::to_string),
        }
    }

    /// Page window and next/prev links once the repository knows the total.
    pub fn paginate(&self, total: u64) -> PaginationState {
        compute_pagination(self.page.as_deref(), self.limit.as_deref(), total)
    }

    pub fn projection(&self) -> Option<Document> {
        self.fields.as_deref().map(projection_document)
    }

    pub fn sort_document(&self) -> Document {
        sort_document(&self.sort)
    }
}
