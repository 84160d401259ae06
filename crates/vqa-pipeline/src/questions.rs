/// Returns true if the question has no visible characters.
pub fn is_blank(question: &str) -> bool {
    question.trim().is_empty()
}

/// Split a multi-line text input into questions, one per line.
///
/// Blank and whitespace-only lines are dropped silently; the remaining lines keep
/// their order and their text as typed.
///
/// # Example
///
/// ```
/// use vqa_pipeline::parse_questions;
///
/// let questions = parse_questions("What is it?\n\n  \r\nHow many?\n");
/// assert_eq!(questions, vec!["What is it?", "How many?"]);
/// ```
pub fn parse_questions(text: &str) -> Vec<String> {
    text.lines()
        .filter(|line| !is_blank(line))
        .map(str::to_string)
        .collect()
}
