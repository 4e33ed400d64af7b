//! Interview session: the ordered questions and the answers given so far.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("interview has no questions")]
    NoQuestions,

    #[error("{answers} answers supplied for {questions} questions")]
    TooManyAnswers { answers: usize, questions: usize },

    #[error("{scores} scores supplied for {answers} answers")]
    ScoreCountMismatch { scores: usize, answers: usize },

    #[error("score {0} is outside 0-10")]
    ScoreOutOfRange(u8),
}

/// Questions plus parallel answers and per-answer overall scores (0–10).
/// Answers are appended one at a time, in question order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewSession {
    role_id: u32,
    questions: Vec<String>,
    answers: Vec<String>,
    scores: Vec<Option<u8>>,
}

impl InterviewSession {
    pub fn new(role_id: u32, questions: Vec<String>) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        Ok(Self {
            role_id,
            questions,
            answers: Vec::new(),
            scores: Vec::new(),
        })
    }

    /// Rebuilds a session from client-held state. `scores` may be empty when
    /// the client did not keep per-answer scores; otherwise it must pair up
    /// with `answers`.
    pub fn from_parts(
        role_id: u32,
        questions: Vec<String>,
        answers: Vec<String>,
        scores: Vec<u8>,
    ) -> Result<Self, SessionError> {
        if answers.len() > questions.len() {
            return Err(SessionError::TooManyAnswers {
                answers: answers.len(),
                questions: questions.len(),
            });
        }
        if !scores.is_empty() && scores.len() != answers.len() {
            return Err(SessionError::ScoreCountMismatch {
                scores: scores.len(),
                answers: answers.len(),
            });
        }

        let mut session = Self::new(role_id, questions)?;
        let mut scores = scores.into_iter();
        for answer in answers {
            session.record_answer(answer, scores.next())?;
        }
        Ok(session)
    }

    pub fn role_id(&self) -> u32 {
        self.role_id
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn record_answer(&mut self, answer: String, score: Option<u8>) -> Result<(), SessionError> {
        if self.is_complete() {
            return Err(SessionError::TooManyAnswers {
                answers: self.answers.len() + 1,
                questions: self.questions.len(),
            });
        }
        if let Some(s) = score.filter(|&s| s > 10) {
            return Err(SessionError::ScoreOutOfRange(s));
        }
        self.answers.push(answer);
        self.scores.push(score);
        Ok(())
    }

    pub fn is_complete(&self) -> bool {
        self.answers.len() >= self.questions.len()
    }

    /// Each question paired with its answer, `None` where unanswered.
    pub fn transcript(&self) -> impl Iterator<Item = (&str, Option<&str>)> + '_ {
        self.questions
            .iter()
            .enumerate()
            .map(|(i, q)| (q.as_str(), self.answers.get(i).map(String::as_str)))
    }

    /// Rounded mean of the recorded per-answer scores.
    pub fn average_score(&self) -> Option<u8> {
        let known: Vec<u32> = self.scores.iter().flatten().map(|&s| s as u32).collect();
        if known.is_empty() {
            return None;
        }
        let mean = known.iter().sum::<u32>() as f64 / known.len() as f64;
        Some(mean.round() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn questions(n: usize) -> Vec<String> {
        (1..=n).map(|i| format!("Question {i}?")).collect()
    }

    #[test]
    fn test_new_rejects_empty_questions() {
        assert_eq!(
            InterviewSession::new(1, vec![]),
            Err(SessionError::NoQuestions)
        );
    }

    #[test]
    fn test_complete_once_every_question_answered() {
        let mut session = InterviewSession::new(1, questions(2)).unwrap();
        session.record_answer("first".to_string(), Some(8)).unwrap();
        assert!(!session.is_complete());
        session.record_answer("second".to_string(), Some(6)).unwrap();
        assert!(session.is_complete());
        assert_eq!(session.answers(), ["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_record_after_complete_fails() {
        let mut session = InterviewSession::new(1, questions(1)).unwrap();
        session.record_answer("only".to_string(), None).unwrap();
        assert!(matches!(
            session.record_answer("extra".to_string(), None),
            Err(SessionError::TooManyAnswers { .. })
        ));
    }

    #[test]
    fn test_record_rejects_out_of_range_score() {
        let mut session = InterviewSession::new(1, questions(1)).unwrap();
        assert_eq!(
            session.record_answer("a".to_string(), Some(70)),
            Err(SessionError::ScoreOutOfRange(70))
        );
    }

    #[test]
    fn test_from_parts_validates_lengths() {
        assert!(matches!(
            InterviewSession::from_parts(1, questions(1), vec!["a".into(), "b".into()], vec![]),
            Err(SessionError::TooManyAnswers { answers: 2, questions: 1 })
        ));
        assert!(matches!(
            InterviewSession::from_parts(1, questions(2), vec!["a".into()], vec![7, 8]),
            Err(SessionError::ScoreCountMismatch { scores: 2, answers: 1 })
        ));
    }

    #[test]
    fn test_transcript_marks_unanswered() {
        let session =
            InterviewSession::from_parts(1, questions(2), vec!["a".into()], vec![]).unwrap();
        let pairs: Vec<_> = session.transcript().collect();
        assert_eq!(pairs, vec![("Question 1?", Some("a")), ("Question 2?", None)]);
    }

    #[test]
    fn test_average_score() {
        let session = InterviewSession::from_parts(
            1,
            questions(3),
            vec!["a".into(), "b".into(), "c".into()],
            vec![7, 8, 8],
        )
        .unwrap();
        assert_eq!(session.average_score(), Some(8));
    }

    #[test]
    fn test_average_score_none_without_scores() {
        let session =
            InterviewSession::from_parts(1, questions(1), vec!["a".into()], vec![]).unwrap();
        assert_eq!(session.average_score(), None);
    }
}
