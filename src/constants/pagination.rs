//! List-query constants.

/// Page number used when `page` is absent or unusable.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when `limit` is absent or unusable.
pub const DEFAULT_LIMIT: u64 = 25;

pub const PARAM_SELECT: &str = "select";
pub const PARAM_SORT: &str = "sort";
pub const PARAM_PAGE: &str = "page";
pub const PARAM_LIMIT: &str = "limit";

/// Parameters with directive meaning; never treated as field filters.
pub const RESERVED_PARAMS: [&str; 4] = [PARAM_SELECT, PARAM_SORT, PARAM_PAGE, PARAM_LIMIT];
