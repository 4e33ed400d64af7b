// Shared prompt fragments for every evaluation prompt.
// The interview module builds its own prompts from these in interview/prompts.rs.
//
// CRITICAL: the score lines and section headings below are the contract the
// response parser depends on. Rewording them is a breaking change for
// interview::parser.

/// Forces the model to speak to the user, not about them.
pub const SECOND_PERSON_INSTRUCTION: &str = "\
    Address the interviewee directly in the second person (\"you\", \"your\"). \
    Never refer to them as \"the candidate\" or in the third person.";

/// Fixed score block. Every value must be a whole number out of 10.
pub const SCORE_FORMAT_INSTRUCTION: &str = "\
Begin your response with these five lines, exactly as written, replacing x with a whole number from 0 to 10:
Clarity: x/10
Relevance: x/10
Confidence: x/10
Grammar: x/10
Overall Score: x/10";

/// Fixed feedback sections that follow the score block.
pub const FEEDBACK_SECTIONS_INSTRUCTION: &str = "\
Then write these three sections, using these exact headings:
Strengths:
- one strength per line

Areas for Improvement:
- one improvement per line

Actionable Advice:
A single short paragraph of concrete advice.";

/// Asks for a plain list with no surrounding commentary.
pub const NUMBERED_LIST_INSTRUCTION: &str = "\
    Return ONLY a numbered list, one question per line (\"1. ...\"). \
    Do NOT include headings, explanations, or answers.";
