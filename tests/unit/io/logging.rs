//! Tests for log filter selection and subscriber installation

#[cfg(test)]
mod tests {
    use puzzleme::io::configuration::DEFAULT_LOG_FILTER;
    use puzzleme::io::logging::{filter_directive, init_logging};

    // Tests verbosity flags map onto filter levels
    // Verified by ignoring the quiet flag
    #[test]
    fn test_filter_directive() {
        assert_eq!(filter_directive(0, false), DEFAULT_LOG_FILTER);
        assert_eq!(filter_directive(1, false), "info");
        assert_eq!(filter_directive(2, false), "debug");
        assert_eq!(filter_directive(9, false), "trace");
        assert_eq!(filter_directive(3, true), "error");
    }

    // Tests a second initialisation leaves the first subscriber in place
    // Verified by panicking on double init
    #[test]
    fn test_init_is_idempotent() {
        let _ = init_logging(0, true);
        assert!(!init_logging(2, false));
    }
}
