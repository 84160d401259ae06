use vqa_image::Image;

/// A pretrained visual question answering model and its paired preprocessor.
///
/// The three steps are kept separate so that callers can isolate a failure to the
/// question that caused it.
pub trait VqaModel {
    /// The model input produced by [`VqaModel::encode`].
    type Input;

    /// The error raised by any of the steps.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Encode an RGB image and a question into the model input representation.
    fn encode(&mut self, image: &Image<u8, 3>, question: &str) -> Result<Self::Input, Self::Error>;

    /// Run generation and return the produced token ids.
    fn generate(&mut self, input: Self::Input) -> Result<Vec<u32>, Self::Error>;

    /// Decode token ids into text, skipping special tokens.
    fn decode(&self, tokens: &[u32]) -> Result<String, Self::Error>;
}
