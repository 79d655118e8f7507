//! HTTP boundary constants

/// Extra request bytes allowed on top of the upload limit for multipart
/// boundaries, part headers and the query string.
pub const MULTIPART_FRAMING_ALLOWANCE: usize = 64 * 1024;

/// Multipart field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Request/response header carrying the correlation id (`X-Request-ID`).
pub const REQUEST_ID_HEADER: &str = "x-request-id";
