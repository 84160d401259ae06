use vqa_pipeline::{Answer, AnswerRecord};

/// The text shown for one answer, with failures rendered as a placeholder.
pub fn render_answer(answer: &Answer) -> String {
    match answer {
        Answer::Text(text) => text.clone(),
        Answer::Failed(reason) => format!("[Could not generate an answer: {reason}]"),
    }
}

/// `Q: <question>\nA: <answer>` blocks separated by a blank line.
pub fn render_records(records: &[AnswerRecord]) -> String {
    records
        .iter()
        .map(|r| format!("Q: {}\nA: {}", r.question, render_answer(&r.answer)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_failed_answer() {
        let answer = Answer::Failed("out of memory".into());
        assert_eq!(
            render_answer(&answer),
            "[Could not generate an answer: out of memory]"
        );
    }

    #[test]
    fn render_blocks() {
        let records = vec![
            AnswerRecord {
                question: "Q1".into(),
                answer: Answer::Text("yes".into()),
            },
            AnswerRecord {
                question: "Q2".into(),
                answer: Answer::Failed("boom".into()),
            },
        ];

        assert_eq!(
            render_records(&records),
            "Q: Q1\nA: yes\n\nQ: Q2\nA: [Could not generate an answer: boom]"
        );
    }

    #[test]
    fn render_nothing() {
        assert_eq!(render_records(&[]), "");
    }
}
