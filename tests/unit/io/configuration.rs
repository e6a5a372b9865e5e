//! Tests for game constants

#[cfg(test)]
mod tests {
    use puzzleme::io::configuration::{
        DEFAULT_DIMENSION, HISTORY_CAPACITY, HISTORY_STORAGE_KEY, MAX_DIMENSION,
        QUIZ_OPTION_COUNT, QUIZ_QUESTION_COUNT, SUPPORTED_DIMENSIONS, TICK_INTERVAL,
    };
    use std::time::Duration;

    // Tests the offered difficulties and the default among them
    // Verified by defaulting to an unsupported size
    #[test]
    fn test_dimensions() {
        assert_eq!(SUPPORTED_DIMENSIONS, [3, 4, 5]);
        assert!(SUPPORTED_DIMENSIONS.contains(&DEFAULT_DIMENSION));
        assert!(SUPPORTED_DIMENSIONS.iter().all(|&dim| dim <= MAX_DIMENSION));
    }

    // Tests vault persistence settings
    // Verified by changing the storage key
    #[test]
    fn test_history_settings() {
        assert_eq!(HISTORY_CAPACITY, 20);
        assert_eq!(HISTORY_STORAGE_KEY, "puzzle_history");
    }

    // Tests the tick interval and quiz shape
    // Verified by ticking every half second
    #[test]
    fn test_timing_and_quiz_shape() {
        assert_eq!(TICK_INTERVAL, Duration::from_secs(1));
        assert_eq!(QUIZ_QUESTION_COUNT, 3);
        assert_eq!(QUIZ_OPTION_COUNT, 4);
    }
}
