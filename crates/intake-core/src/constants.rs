//! Constants shared by the ledger, the HTTP boundary and the CLI.

/// Largest accepted upload, in bytes. Anything strictly larger is rejected.
pub const MAX_UPLOAD_BYTES: usize = 2_000_000;

/// Submitter identity used when the caller does not supply one.
pub const ANONYMOUS_SUBMITTER: &str = "anon";

/// Length of a hex-encoded SHA-256 digest.
pub const FINGERPRINT_HEX_LEN: usize = 64;

/// Filename recorded when a multipart file part carries none.
pub const UNKNOWN_FILENAME: &str = "unknown";
