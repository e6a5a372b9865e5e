//! Tests for quiz round progress and scoring

#[cfg(test)]
mod tests {
    use puzzleme::services::quiz::QuizQuestion;
    use puzzleme::session::quiz::{QuizProgress, QuizRound};

    fn questions() -> Vec<QuizQuestion> {
        (0..3)
            .map(|n| QuizQuestion {
                question: format!("Q{n}"),
                options: vec!["w".into(), "x".into(), "y".into(), "z".into()],
                correct_index: n,
                explanation: format!("E{n}"),
            })
            .collect()
    }

    // Tests an empty question list does not start a round
    // Verified by constructing with no questions
    #[test]
    fn test_new_requires_questions() {
        assert!(QuizRound::new(Vec::new()).is_none());
        let Some(round) = QuizRound::new(questions()) else {
            panic!("round not started");
        };
        assert_eq!(round.len(), 3);
        assert!(!round.is_empty());
        assert_eq!(round.current_index(), 0);
        assert_eq!(round.current_question().map(|q| q.question.as_str()), Some("Q0"));
    }

    // Tests only the first answer per question counts
    // Verified by scoring every answer
    #[test]
    fn test_answer_once() {
        let Some(mut round) = QuizRound::new(questions()) else {
            panic!("round not started");
        };
        let Some(feedback) = round.answer(0) else {
            panic!("answer rejected");
        };
        assert!(feedback.correct);
        assert_eq!(feedback.explanation, "E0");
        assert_eq!(round.selected(), Some(0));
        assert!(round.answer(1).is_none());
        assert_eq!(round.score(), 1);
        assert!(round.answer(9).is_none());
    }

    // Tests out-of-range options are ignored
    // Verified by accepting any index
    #[test]
    fn test_answer_out_of_range() {
        let Some(mut round) = QuizRound::new(questions()) else {
            panic!("round not started");
        };
        assert!(round.answer(4).is_none());
        assert_eq!(round.selected(), None);
    }

    // Tests advancing through the round to completion
    // Verified by advancing before an answer
    #[test]
    fn test_advance_to_completion() {
        let Some(mut round) = QuizRound::new(questions()) else {
            panic!("round not started");
        };
        assert_eq!(round.advance(), None);

        assert!(round.answer(0).is_some_and(|f| f.correct));
        assert_eq!(round.advance(), Some(QuizProgress::Next { index: 1 }));
        assert!(round.answer(0).is_some_and(|f| !f.correct && f.correct_index == 1));
        assert_eq!(round.advance(), Some(QuizProgress::Next { index: 2 }));
        assert!(round.answer(2).is_some_and(|f| f.correct));
        assert_eq!(round.advance(), Some(QuizProgress::Complete { score: 2 }));
    }
}
