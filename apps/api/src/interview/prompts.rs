// Prompt composer for the interview pipeline.
// Pure string building: no I/O, text is inlined as-is.
// The score/section wording comes from llm_client::prompts and is what
// interview::parser depends on.

use crate::interview::session::InterviewSession;
use crate::llm_client::prompts::{
    FEEDBACK_SECTIONS_INSTRUCTION, NUMBERED_LIST_INSTRUCTION, SCORE_FORMAT_INSTRUCTION,
    SECOND_PERSON_INSTRUCTION,
};

/// Per-answer feedback prompt template.
/// Replace: {role}, {second_person}, {question}, {answer}, {score_format}, {sections}
const ANSWER_FEEDBACK_TEMPLATE: &str = r#"You are an expert interviewer hiring for the {role} position.
Evaluate the interview answer below.

{second_person}

Question: {question}
Answer: {answer}

{score_format}

{sections}"#;

/// Final report prompt template.
/// Replace: {role}, {second_person}, {transcript}, {score_format}, {sections}
const FINAL_REPORT_TEMPLATE: &str = r#"You are an expert interviewer hiring for the {role} position.
Review the complete mock interview below and write a final performance report.

{second_person}

INTERVIEW TRANSCRIPT:
{transcript}

Score the interview as a whole.
{score_format}

{sections}"#;

/// Question generation prompt template.
/// Replace: {count}, {role}, {resume_block}, {list_instruction}
const QUESTION_GENERATION_TEMPLATE: &str = r#"You are an expert hiring manager. Generate {count} distinct interview questions for a {role} candidate.
{resume_block}
{list_instruction}"#;

const NO_ANSWER: &str = "(no answer given)";

pub fn answer_feedback_prompt(role_title: &str, question: &str, answer: &str) -> String {
    ANSWER_FEEDBACK_TEMPLATE
        .replace("{role}", role_title)
        .replace("{second_person}", SECOND_PERSON_INSTRUCTION)
        .replace("{score_format}", SCORE_FORMAT_INSTRUCTION)
        .replace("{sections}", FEEDBACK_SECTIONS_INSTRUCTION)
        // user text last so braces inside answers are never treated as placeholders
        .replace("{question}", question)
        .replace("{answer}", answer)
}

pub fn final_report_prompt(role_title: &str, session: &InterviewSession) -> String {
    FINAL_REPORT_TEMPLATE
        .replace("{role}", role_title)
        .replace("{second_person}", SECOND_PERSON_INSTRUCTION)
        .replace("{score_format}", SCORE_FORMAT_INSTRUCTION)
        .replace("{sections}", FEEDBACK_SECTIONS_INSTRUCTION)
        .replace("{transcript}", &render_transcript(session))
}

pub fn question_generation_prompt(
    role_title: &str,
    count: usize,
    resume_text: Option<&str>,
) -> String {
    let resume_block = match resume_text.map(str::trim).filter(|r| !r.is_empty()) {
        Some(resume) => format!(
            "Tailor the questions to the candidate's experience as described in this resume:\n{resume}\n"
        ),
        None => String::new(),
    };

    QUESTION_GENERATION_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{role}", role_title)
        .replace("{list_instruction}", NUMBERED_LIST_INSTRUCTION)
        .replace("{resume_block}", &resume_block)
}

fn render_transcript(session: &InterviewSession) -> String {
    session
        .transcript()
        .enumerate()
        .map(|(i, (question, answer))| {
            format!(
                "Q{n}: {question}\nA{n}: {answer}",
                n = i + 1,
                answer = answer.unwrap_or(NO_ANSWER)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
