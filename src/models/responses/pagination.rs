//! Listing envelope.

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{AppointmentResponse, HospitalResponse};
use crate::query::Pagination;

/// `{success, count, pagination, data}` returned by list endpoints
#[derive(Debug, Serialize, ToSchema)]
#[aliases(
    HospitalListResponse = ListResponse<HospitalResponse>,
    AppointmentListResponse = ListResponse<AppointmentResponse>
)]
pub struct ListResponse<T> {
    /// Whether the request was successful
    pub success: bool,
    /// Number of items on this page
    pub count: usize,
    /// Links to neighbouring pages
    pub pagination: Pagination,
    /// Items on this page
    pub data: Vec<T>,
}

impl<T> ListResponse<T> {
    pub fn new(data: Vec<T>, pagination: Pagination) -> Self {
        Self {
            success: true,
            count: data.len(),
            pagination,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::PageLink;

    #[test]
    fn test_envelope_shape() {
        let pagination = Pagination {
            next: None,
            prev: Some(PageLink { page: 1, limit: 2 }),
        };
        let json = serde_json::to_value(ListResponse::new(vec!["a", "b"], pagination)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "success": true,
                "count": 2,
                "pagination": { "prev": { "page": 1, "limit": 2 } },
                "data": ["a", "b"],
            })
        );
    }
}
