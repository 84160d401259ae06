use vqa_image::Image;
use vqa_io::CameraBackend;
use vqa_model::VqaModel;

use crate::{
    answer::{answer, AnswerRecord},
    error::PipelineError,
    questions::parse_questions,
};

/// The state of one application session.
///
/// Holds only the most recent capture and the most recent batch of answers.
#[derive(Default)]
pub struct Session {
    image: Option<Image<u8, 3>>,
    answers: Vec<AnswerRecord>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture a new image from the default camera.
    ///
    /// On success the new image replaces the previous one. On failure the
    /// previous image, if any, is kept.
    pub fn capture<B>(&mut self, backend: &mut B) -> Result<&Image<u8, 3>, PipelineError>
    where
        B: CameraBackend + ?Sized,
    {
        let image = vqa_io::capture(backend)?;
        Ok(self.image.insert(image))
    }

    /// Answer the questions in a multi-line text about the latest capture.
    ///
    /// On success the new records replace the previous batch. On failure the
    /// previous batch is kept.
    pub fn ask<M>(&mut self, model: &mut M, text: &str) -> Result<&[AnswerRecord], PipelineError>
    where
        M: VqaModel + ?Sized,
    {
        let questions = parse_questions(text);
        self.answers = answer(model, self.image.as_ref(), &questions)?;
        Ok(&self.answers)
    }

    /// The latest captured image.
    pub fn image(&self) -> Option<&Image<u8, 3>> {
        self.image.as_ref()
    }

    /// The latest batch of answers.
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }
}
