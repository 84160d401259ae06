use vqa_image::Image;
use vqa_model::VqaModel;

use crate::{error::PipelineError, questions::is_blank};

/// The outcome of one question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Answer {
    /// The text generated by the model.
    Text(String),
    /// The model failed on this question; holds the failure description.
    Failed(String),
}

impl Answer {
    /// Returns true if the model produced an answer.
    pub fn is_text(&self) -> bool {
        matches!(self, Answer::Text(_))
    }
}

/// A question paired with its answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerRecord {
    /// The question as given.
    pub question: String,
    /// The answer or the failure for this question.
    pub answer: Answer,
}

/// Answer every non-blank question about `image`, one record per question.
///
/// Questions are processed independently and in order. A failure while encoding,
/// generating or decoding one question becomes [`Answer::Failed`] for that
/// question and the batch continues; it never affects the other records.
///
/// # Errors
///
/// * [`PipelineError::NoImageCaptured`] if `image` is `None`. Checked first; the
///   model is not called.
/// * [`PipelineError::NoQuestionsProvided`] if every question is blank.
pub fn answer<M, S>(
    model: &mut M,
    image: Option<&Image<u8, 3>>,
    questions: &[S],
) -> Result<Vec<AnswerRecord>, PipelineError>
where
    M: VqaModel + ?Sized,
    S: AsRef<str>,
{
    let image = image.ok_or(PipelineError::NoImageCaptured)?;

    let questions: Vec<&str> = questions
        .iter()
        .map(|q| q.as_ref())
        .filter(|q| !is_blank(q))
        .collect();

    if questions.is_empty() {
        return Err(PipelineError::NoQuestionsProvided);
    }

    let records = questions
        .into_iter()
        .enumerate()
        .map(|(i, question)| {
            log::debug!("answering question {}: {question}", i + 1);
            let answer = match answer_one(model, image, question) {
                Ok(text) => Answer::Text(text),
                Err(e) => {
                    log::warn!("question {} failed: {e}", i + 1);
                    Answer::Failed(e.to_string())
                }
            };
            AnswerRecord {
                question: question.to_string(),
                answer,
            }
        })
        .collect();

    Ok(records)
}

fn answer_one<M>(model: &mut M, image: &Image<u8, 3>, question: &str) -> Result<String, M::Error>
where
    M: VqaModel + ?Sized,
{
    let input = model.encode(image, question)?;
    let tokens = model.generate(input)?;
    model.decode(&tokens)
}
