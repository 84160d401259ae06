/// Top-level pipeline failures.
///
/// Every variant is reported to the caller and leaves the session usable.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    /// Inference was requested before any successful capture.
    #[error("No image captured")]
    NoImageCaptured,

    /// Inference was requested with only blank questions.
    #[error("No questions provided")]
    NoQuestionsProvided,

    /// The camera capture failed.
    #[error(transparent)]
    Capture(#[from] vqa_io::CaptureError),
}
