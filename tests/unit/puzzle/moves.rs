//! Tests for the undo stack of swap records

#[cfg(test)]
mod tests {
    use puzzleme::puzzle::moves::{MoveLog, MoveRecord};

    // Tests records pop in reverse order
    // Verified by popping from the front
    #[test]
    fn test_move_log_is_lifo() {
        let mut log = MoveLog::new();
        assert!(log.is_empty());
        log.push(MoveRecord::new(0, 1));
        log.push(MoveRecord::new(2, 3));

        assert_eq!(log.len(), 2);
        assert_eq!(log.last(), Some(MoveRecord::new(2, 3)));
        assert_eq!(log.pop(), Some(MoveRecord::new(2, 3)));
        assert_eq!(log.pop(), Some(MoveRecord::new(0, 1)));
        assert_eq!(log.pop(), None);
    }

    // Tests clearing empties the log
    // Verified by leaving the last record behind
    #[test]
    fn test_move_log_clear() {
        let mut log = MoveLog::new();
        log.push(MoveRecord::new(4, 5));
        log.push(MoveRecord::new(5, 6));
        assert_eq!(log.records(), &[MoveRecord::new(4, 5), MoveRecord::new(5, 6)]);

        log.clear();
        assert!(log.is_empty());
        assert!(log.last().is_none());
    }
}
