//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success (all expected lines matched)     |
//! | 1       | Universal        | Mismatches found                         |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | Local IO         | Filesystem errors                        |
//! | 10-19   | labeler          | Labeling service codes                   |
//! | 20-29   | reference        | Reference document codes                 |
//! | 30-39   | config           | Config file codes                        |
//! | 50-59   | fetch            | Page fetch codes                         |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use copycheck_acquire::AcquireError;

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - every expected line matched.
pub const EXIT_SUCCESS: u8 = 0;

/// Mismatches found. Like `diff(1)`, exit 1 means "content differs."
pub const EXIT_MISMATCH: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Local IO (3-9)
// =============================================================================

/// Cannot read or write a local file (output, saved page text).
pub const EXIT_IO: u8 = 3;

// =============================================================================
// Labeler (10-19)
// =============================================================================

/// No labeling service API key provided (neither flag nor env var), or
/// credentials rejected by the service (401/403).
pub const EXIT_LABEL_NOT_AUTH: u8 = 10;

/// Labeling service failed (5xx, network failure after retries) or returned
/// an unusable response.
pub const EXIT_LABEL_UPSTREAM: u8 = 11;

// =============================================================================
// Reference document (20-29)
// =============================================================================

/// Reference document unreadable or corrupt.
pub const EXIT_REFERENCE_PARSE: u8 = 20;

// =============================================================================
// Config (30-39)
// =============================================================================

/// Config file failed to parse or validate.
pub const EXIT_CONFIG_INVALID: u8 = 30;

// =============================================================================
// Fetch (50-59)
// =============================================================================

/// Page fetch failed (network, timeout, non-2xx after retries).
pub const EXIT_FETCH_ERROR: u8 = 50;

/// Map an acquisition error to its exit code.
pub fn acquire_exit_code(err: &AcquireError) -> u8 {
    match err {
        AcquireError::Fetch(_) => EXIT_FETCH_ERROR,
        AcquireError::Parse(_) => EXIT_REFERENCE_PARSE,
        AcquireError::LabelAuth(_) => EXIT_LABEL_NOT_AUTH,
        AcquireError::LabelService(_) => EXIT_LABEL_UPSTREAM,
        AcquireError::Input(_) => EXIT_USAGE,
    }
}
