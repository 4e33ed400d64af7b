//! Interview Coach: orchestrates prompt → LLM → parse → cache for every interview step.
//!
//! Flow per operation: cache lookup → compose prompt → one gateway call raced
//! against the timeout budget → parse → cache the parsed value.
//!
//! Every public operation returns a value. LLM errors and timeouts are logged
//! and mapped to the static tables in `fallback`; fallbacks are never cached,
//! so the next identical request tries the LLM again.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::interview::cache::{feedback_key, questions_key, report_key, Clock, TtlCache};
use crate::interview::fallback::{
    fallback_evaluation, fallback_questions, fallback_report_analysis, invalid_answer_evaluation,
    is_gibberish,
};
use crate::interview::feedback::AnswerEvaluation;
use crate::interview::parser::parse_questions;
use crate::interview::prompts::{
    answer_feedback_prompt, final_report_prompt, question_generation_prompt,
};
use crate::interview::report::InterviewReport;
use crate::interview::roles::JobRole;
use crate::interview::session::InterviewSession;
use crate::llm_client::CompletionGateway;

#[derive(Debug, Clone)]
pub struct CoachSettings {
    /// Budget for one LLM call before falling back.
    pub llm_timeout: Duration,
    pub cache_ttl: chrono::Duration,
    pub question_count: usize,
}

impl Default for CoachSettings {
    fn default() -> Self {
        Self {
            llm_timeout: Duration::from_secs(20),
            cache_ttl: chrono::Duration::hours(1),
            question_count: 5,
        }
    }
}

pub struct InterviewCoach {
    gateway: Arc<dyn CompletionGateway>,
    settings: CoachSettings,
    feedback_cache: Mutex<TtlCache<AnswerEvaluation>>,
    question_cache: Mutex<TtlCache<Vec<String>>>,
    report_cache: Mutex<TtlCache<AnswerEvaluation>>,
}

impl InterviewCoach {
    pub fn new(
        gateway: Arc<dyn CompletionGateway>,
        settings: CoachSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let ttl = settings.cache_ttl;
        Self {
            gateway,
            feedback_cache: Mutex::new(TtlCache::new(ttl, clock.clone())),
            question_cache: Mutex::new(TtlCache::new(ttl, clock.clone())),
            report_cache: Mutex::new(TtlCache::new(ttl, clock)),
            settings,
        }
    }

    /// Interview questions for a role, tailored to the resume when one is given.
    /// Falls back to the role's static list.
    pub async fn generate_questions(
        &self,
        role: &JobRole,
        resume_text: Option<&str>,
    ) -> Vec<String> {
        let key = questions_key(resume_text, role.id);
        if let Some(cached) = self.question_cache.lock().await.get(&key) {
            debug!("Question cache hit for role {}", role.id);
            return cached;
        }

        let prompt = question_generation_prompt(
            &role.display_title(),
            self.settings.question_count,
            resume_text,
        );

        let Some(response) = self.complete_within_budget(&prompt, "question generation").await
        else {
            return fallback_questions(role.id);
        };

        let questions = parse_questions(&response, self.settings.question_count);
        if questions.is_empty() {
            warn!(
                "LLM returned no usable questions for role {}, using static list",
                role.id
            );
            return fallback_questions(role.id);
        }

        info!(
            "Generated {} questions for role {} (resume: {})",
            questions.len(),
            role.id,
            resume_text.is_some()
        );
        self.question_cache.lock().await.put(key, questions.clone());
        questions
    }

    /// Scores and feedback for one answer.
    pub async fn evaluate_answer(
        &self,
        role: &JobRole,
        question: &str,
        answer: &str,
    ) -> AnswerEvaluation {
        let key = feedback_key(question, answer, role.id);
        if let Some(cached) = self.feedback_cache.lock().await.get(&key) {
            debug!("Feedback cache hit for role {}", role.id);
            return cached;
        }

        if is_gibberish(answer) {
            info!("Answer for role {} has no valid words, skipping LLM", role.id);
            return invalid_answer_evaluation();
        }

        let prompt = answer_feedback_prompt(&role.display_title(), question, answer);
        let Some(response) = self.complete_within_budget(&prompt, "answer feedback").await else {
            return fallback_evaluation();
        };

        let evaluation = AnswerEvaluation::from_response(&response);
        info!(
            "Answer evaluated for role {}: overall={}/10 sentiment={:?}",
            role.id, evaluation.scores.overall, evaluation.scores.sentiment
        );

        let mut cache = self.feedback_cache.lock().await;
        cache.put(key, evaluation.clone());
        debug!("Feedback cache holds {} entries", cache.entry_count());
        evaluation
    }

    /// Final report over the whole session.
    pub async fn generate_report(
        &self,
        role: &JobRole,
        session: &InterviewSession,
    ) -> InterviewReport {
        let role_title = role.display_title();
        let key = report_key(session.questions(), session.answers(), session.role_id());

        let cached = self.report_cache.lock().await.get(&key);
        let analysis = match cached {
            Some(analysis) => {
                debug!("Report cache hit for role {}", role.id);
                analysis
            }
            None => {
                let prompt = final_report_prompt(&role_title, session);
                match self.complete_within_budget(&prompt, "final report").await {
                    Some(response) => {
                        let analysis = AnswerEvaluation::from_response(&response);
                        self.report_cache.lock().await.put(key, analysis.clone());
                        analysis
                    }
                    None => fallback_report_analysis(),
                }
            }
        };

        let report = InterviewReport::assemble(&role_title, session, &analysis, Utc::now());
        info!(
            "Report ready for role {}: {}/100 over {} questions",
            role.id,
            report.overall_score,
            report.questions.len()
        );
        report
    }

    /// One gateway call raced against the timeout budget. `None` means fall back.
    async fn complete_within_budget(&self, prompt: &str, operation: &str) -> Option<String> {
        match tokio::time::timeout(self.settings.llm_timeout, self.gateway.complete(prompt)).await
        {
            Ok(Ok(text)) => Some(text),
            Ok(Err(e)) => {
                warn!("{operation}: LLM call failed, using fallback: {e}");
                None
            }
            Err(_) => {
                warn!(
                    "{operation}: LLM call exceeded {}s budget, using fallback",
                    self.settings.llm_timeout.as_secs()
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::cache::ManualClock;
    use crate::interview::feedback::FeedbackPayload;
    use crate::interview::parser::Sentiment;
    use crate::interview::roles::find_role;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ========================================================================
    // Mock gateways
    // ========================================================================

    /// Replays canned responses in order and counts calls.
    struct ScriptedGateway {
        responses: std::sync::Mutex<Vec<Result<String, LlmError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                responses: std::sync::Mutex::new(responses),
                calls: AtomicUsize::new(0),
            })
        }

        fn with_text(text: &str) -> Arc<Self> {
            Self::new(vec![Ok(text.to_string())])
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CompletionGateway for ScriptedGateway {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().unwrap();
            if responses.is_empty() {
                Err(LlmError::EmptyContent)
            } else {
                responses.remove(0)
            }
        }
    }

    /// Never answers within any reasonable budget.
    struct StalledGateway;

    #[async_trait]
    impl CompletionGateway for StalledGateway {
        async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("Clarity: 10/10".to_string())
        }
    }

    fn coach_with(gateway: Arc<dyn CompletionGateway>) -> (InterviewCoach, Arc<ManualClock>) {
        let clock = ManualClock::new();
        let coach = InterviewCoach::new(gateway, CoachSettings::default(), clock.clone());
        (coach, clock)
    }

    fn role() -> &'static JobRole {
        find_role(2).unwrap()
    }

    const GOOD_RESPONSE: &str = "Clarity: 8/10\nRelevance: 7/10\nConfidence: 9/10\nGrammar: 8/10\nOverall Score: 8/10\n\nStrengths:\n- Clear structure\n\nAreas for Improvement:\n- Add metrics\n\nActionable Advice:\nQuantify impact.";

    // ========================================================================
    // evaluate_answer
    // ========================================================================

    #[tokio::test]
    async fn test_evaluate_answer_parses_llm_response() {
        let gateway = ScriptedGateway::with_text(GOOD_RESPONSE);
        let (coach, _) = coach_with(gateway.clone());

        let eval = coach
            .evaluate_answer(role(), "How do you test?", "I write unit tests first.")
            .await;

        assert_eq!(eval.scores.clarity, 8);
        assert_eq!(eval.scores.overall, 8);
        assert_eq!(eval.feedback.strengths(), ["Clear structure".to_string()]);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_evaluate_answer_is_cached() {
        let gateway = ScriptedGateway::with_text(GOOD_RESPONSE);
        let (coach, _) = coach_with(gateway.clone());

        let first = coach.evaluate_answer(role(), "q?", "my answer here").await;
        let second = coach.evaluate_answer(role(), "q?", "my answer here").await;

        assert_eq!(first, second);
        assert_eq!(gateway.calls(), 1, "second call must be served from cache");
    }

    #[tokio::test]
    async fn test_cache_expires_after_ttl() {
        let gateway = ScriptedGateway::new(vec![
            Ok(GOOD_RESPONSE.to_string()),
            Ok("Overall Score: 3/10".to_string()),
        ]);
        let (coach, clock) = coach_with(gateway.clone());

        coach.evaluate_answer(role(), "q?", "my answer here").await;
        clock.advance(chrono::Duration::hours(1));
        let refreshed = coach.evaluate_answer(role(), "q?", "my answer here").await;

        assert_eq!(gateway.calls(), 2);
        assert_eq!(refreshed.scores.overall, 3);
    }

    #[tokio::test]
    async fn test_llm_error_returns_fallback_and_is_not_cached() {
        let gateway = ScriptedGateway::new(vec![
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            }),
            Ok(GOOD_RESPONSE.to_string()),
        ]);
        let (coach, _) = coach_with(gateway.clone());

        let first = coach.evaluate_answer(role(), "q?", "my answer here").await;
        assert_eq!(first, fallback_evaluation());

        let second = coach.evaluate_answer(role(), "q?", "my answer here").await;
        assert_eq!(second.scores.clarity, 8);
        assert_eq!(gateway.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_returns_exact_fallback() {
        let (coach, _) = coach_with(Arc::new(StalledGateway));
        let eval = coach
            .evaluate_answer(role(), "q?", "a thoughtful answer")
            .await;
        assert_eq!(eval, fallback_evaluation());
    }

    #[tokio::test]
    async fn test_gibberish_answer_skips_llm() {
        let gateway = ScriptedGateway::with_text(GOOD_RESPONSE);
        let (coach, _) = coach_with(gateway.clone());

        let eval = coach.evaluate_answer(role(), "q?", "zz 12 !!").await;

        assert_eq!(eval, invalid_answer_evaluation());
        assert_eq!(gateway.calls(), 0);
    }

    #[tokio::test]
    async fn test_unstructured_response_kept_raw() {
        let gateway = ScriptedGateway::with_text("That was an excellent answer overall.");
        let (coach, _) = coach_with(gateway);

        let eval = coach.evaluate_answer(role(), "q?", "my answer here").await;

        assert_eq!(eval.scores.sentiment, Sentiment::Positive);
        assert!(matches!(eval.feedback, FeedbackPayload::Raw { .. }));
    }

    // ========================================================================
    // generate_questions
    // ========================================================================

    #[tokio::test]
    async fn test_generate_questions_parses_list() {
        let gateway = ScriptedGateway::with_text(
            "1. What is borrowing?\n2. Explain Send and Sync.\n3. What is borrowing?",
        );
        let (coach, _) = coach_with(gateway);

        let questions = coach.generate_questions(role(), Some("Rust dev")).await;
        assert_eq!(
            questions,
            vec!["What is borrowing?", "Explain Send and Sync."]
        );
    }

    #[tokio::test]
    async fn test_generate_questions_cached_by_resume_prefix() {
        let gateway = ScriptedGateway::with_text("1. Why Rust?");
        let (coach, _) = coach_with(gateway.clone());

        let resume_a = "r".repeat(50) + " - worked at A";
        let resume_b = "r".repeat(50) + " - worked at B";
        coach.generate_questions(role(), Some(&resume_a)).await;
        let again = coach.generate_questions(role(), Some(&resume_b)).await;

        assert_eq!(again, vec!["Why Rust?"]);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn test_generate_questions_falls_back_on_empty_list() {
        let gateway = ScriptedGateway::with_text("Here you go:\n\n---");
        let (coach, _) = coach_with(gateway);

        let questions = coach.generate_questions(role(), None).await;
        assert_eq!(questions, fallback_questions(2));
    }

    #[tokio::test]
    async fn test_generate_questions_falls_back_on_error() {
        let (coach, _) = coach_with(ScriptedGateway::new(vec![]));
        let questions = coach.generate_questions(find_role(7).unwrap(), None).await;
        assert_eq!(questions, fallback_questions(7));
    }

    // ========================================================================
    // generate_report
    // ========================================================================

    fn finished_session() -> InterviewSession {
        InterviewSession::from_parts(
            2,
            vec!["Q1?".to_string(), "Q2?".to_string()],
            vec!["First answer".to_string(), "Second answer".to_string()],
            vec![6, 8],
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_generate_report_from_llm() {
        let gateway = ScriptedGateway::with_text(GOOD_RESPONSE);
        let (coach, _) = coach_with(gateway.clone());

        let report = coach.generate_report(role(), &finished_session()).await;

        assert_eq!(report.role_title, "Software Developer - Mid Level");
        assert_eq!(report.overall_score, 80);
        assert_eq!(report.improvements, vec!["Add metrics"]);
        assert_eq!(report.questions.len(), 2);

        coach.generate_report(role(), &finished_session()).await;
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_generate_report_timeout_uses_fallback() {
        let (coach, _) = coach_with(Arc::new(StalledGateway));
        let report = coach.generate_report(role(), &finished_session()).await;
        assert_eq!(report.overall_score, 70);
        assert_eq!(report.strengths[0], "You participated in the interview process");
    }
}
