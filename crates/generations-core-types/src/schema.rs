//! Canonical schema constants for structured logging
//!
//! The logging macros emit these field names; the test capture layer and the
//! log assertions read them back by the same constants.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_PERSON_ID: &str = "person_id";
pub const FIELD_PROBAND: &str = "proband";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_distinct() {
        assert_ne!(EVENT_START, EVENT_END);
        assert_ne!(EVENT_START, EVENT_END_ERROR);
        assert_ne!(EVENT_END, EVENT_END_ERROR);
    }

    #[test]
    fn test_error_fields_are_flat() {
        // nested keys would not survive the JSON formatter unchanged
        assert!(!FIELD_ERR_KIND.contains('.'));
        assert!(!FIELD_ERR_CODE.contains('.'));
    }
}
