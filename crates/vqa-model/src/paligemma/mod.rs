use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::paligemma::{Config, Model};
use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::Tokenizer;
use vqa_image::{resize::resize_bilinear, Image};

use crate::generation::{TextGeneration, TextGenerationConfig};
use crate::utils::hub_load_safetensors;
use crate::VqaModel;

/// The published checkpoint loaded by [`Paligemma::new`].
///
/// The `mix` checkpoints are fine-tuned on a task mixture that includes visual
/// question answering.
pub const MODEL_ID: &str = "google/paligemma-3b-mix-224";

/// Side length of the square input image expected by the vision tower.
pub const IMAGE_SIZE: usize = 224;

#[derive(thiserror::Error, Debug)]
pub enum PaligemmaError {
    #[error(transparent)]
    FailedToLoadModel(#[from] hf_hub::api::sync::ApiError),

    #[error(transparent)]
    CandleError(#[from] candle_core::Error),

    #[error(transparent)]
    ImageError(#[from] vqa_image::ImageError),

    #[error(transparent)]
    TokenizerError(#[from] tokenizers::Error),

    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    JsonError(#[from] serde_json::Error),

    #[error("The safetensors index has no weight_map")]
    MissingWeightMap,

    #[error("Cannot find the <eos> token")]
    EosTokenNotFound,

    #[error("The question is empty")]
    EmptyPrompt,

    #[error("The shared model lock is poisoned")]
    Poisoned,
}

/// Configuration for the Paligemma model
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PaligemmaConfig {
    pub seed: u64,
    /// Sampling temperature; `None` decodes greedily.
    pub temp: Option<f64>,
    pub top_p: Option<f64>,
    pub repeat_penalty: f32,
    pub repeat_last_n: usize,
    /// Maximum number of generated tokens per answer.
    pub sample_len: usize,
}

impl From<PaligemmaConfig> for TextGenerationConfig {
    fn from(config: PaligemmaConfig) -> Self {
        TextGenerationConfig {
            seed: config.seed,
            temp: config.temp,
            top_p: config.top_p,
            repeat_penalty: config.repeat_penalty,
            repeat_last_n: config.repeat_last_n,
        }
    }
}

impl Default for PaligemmaConfig {
    fn default() -> Self {
        Self {
            seed: 299792458,
            temp: None,
            top_p: None,
            repeat_penalty: 1.1,
            repeat_last_n: 64,
            sample_len: 32,
        }
    }
}

/// An encoded (image, question) pair ready for generation.
pub struct PaligemmaInput {
    pixel_values: Tensor,
    prompt_ids: Vec<u32>,
}

/// The Paligemma model
///
/// Answers questions about an image with the Google Paligemma `mix` checkpoint.
///
/// NOTE: to run the model with Cuda, you need to pass the `--features cuda` flag to the `cargo run` command.
pub struct Paligemma {
    pipeline: TextGeneration,
    tokenizer: Tokenizer,
    img_buf: Image<u8, 3>,
    dtype: DType,
    sample_len: usize,
}

impl Paligemma {
    /// Create a new Paligemma model, downloading the weights if needed.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the Paligemma model
    pub fn new(config: PaligemmaConfig) -> Result<Self, PaligemmaError> {
        #[cfg(feature = "cuda")]
        let (device, dtype) = match Device::cuda_if_available(0) {
            Ok(device) => (device, DType::BF16),
            Err(e) => {
                log::warn!("CUDA not available, defaulting to CPU: {e}");
                (Device::Cpu, DType::F32)
            }
        };

        #[cfg(not(feature = "cuda"))]
        let (device, dtype) = (Device::Cpu, DType::F32);

        let (model, tokenizer) = Self::load_model(dtype, &device)?;
        let eos_token = tokenizer
            .token_to_id("<eos>")
            .ok_or(PaligemmaError::EosTokenNotFound)?;
        let img_buf = Image::from_size_val([IMAGE_SIZE, IMAGE_SIZE].into(), 0)?;
        let pipeline = TextGeneration::new(model, device, eos_token, config.into());

        Ok(Self {
            pipeline,
            tokenizer,
            img_buf,
            dtype,
            sample_len: config.sample_len,
        })
    }

    // utility function to load the model
    fn load_model(dtype: DType, device: &Device) -> Result<(Model, Tokenizer), PaligemmaError> {
        log::info!("loading {MODEL_ID}");
        let api = Api::new()?;
        let repo = api.repo(Repo::with_revision(
            MODEL_ID.to_string(),
            RepoType::Model,
            "main".to_string(),
        ));

        let tokenizer_filename = repo.get("tokenizer.json")?;
        let filenames = hub_load_safetensors(&repo, "model.safetensors.index.json")?;

        let tokenizer = Tokenizer::from_file(tokenizer_filename)?;

        let config = Config::paligemma_3b_224();
        // SAFETY: the weight files are not modified while mapped
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&filenames, dtype, device)? };

        let model = Model::new(&config, vb)?;
        log::info!("{MODEL_ID} loaded on {device:?} ({dtype:?})");

        Ok((model, tokenizer))
    }
}

impl VqaModel for Paligemma {
    type Input = PaligemmaInput;
    type Error = PaligemmaError;

    fn encode(&mut self, image: &Image<u8, 3>, question: &str) -> Result<PaligemmaInput, PaligemmaError> {
        let prompt = vqa_prompt(question).ok_or(PaligemmaError::EmptyPrompt)?;

        resize_bilinear(image, &mut self.img_buf)?;

        // convert to tensor with shape [1, 3, 224, 224] in [-1, 1]
        let pixel_values = Tensor::from_raw_buffer(
            self.img_buf.as_slice(),
            DType::U8,
            &[self.img_buf.rows(), self.img_buf.cols(), 3],
            self.pipeline.device(),
        )?
        .to_dtype(self.dtype)?
        .permute((2, 0, 1))?
        .affine(2. / 255., -1.)?
        .unsqueeze(0)?;

        let prompt_ids = self.tokenizer.encode(prompt, true)?.get_ids().to_vec();

        Ok(PaligemmaInput {
            pixel_values,
            prompt_ids,
        })
    }

    fn generate(&mut self, input: PaligemmaInput) -> Result<Vec<u32>, PaligemmaError> {
        self.pipeline
            .run(&input.pixel_values, &input.prompt_ids, self.sample_len)
    }

    fn decode(&self, tokens: &[u32]) -> Result<String, PaligemmaError> {
        let text = self.tokenizer.decode(tokens, true)?;
        Ok(text.trim().to_string())
    }
}

/// The task prompt for a question, or `None` if the question is blank.
///
/// The prefix is terminated by a newline, which separates it from the answer.
pub fn vqa_prompt(question: &str) -> Option<String> {
    let question = question.trim();
    if question.is_empty() {
        return None;
    }
    Some(format!("answer en {question}\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vqa_prompt_format() {
        assert_eq!(
            vqa_prompt("  What color is the object? "),
            Some("answer en What color is the object?\n".to_string())
        );
    }

    #[test]
    fn vqa_prompt_blank() {
        assert_eq!(vqa_prompt(" \t "), None);
    }

    #[test]
    fn default_config_is_greedy() {
        let config = PaligemmaConfig::default();
        assert_eq!(config.temp, None);
        assert_eq!(config.sample_len, 32);

        let gen: TextGenerationConfig = config.into();
        assert_eq!(gen.seed, 299792458);
        assert_eq!(gen.repeat_last_n, 64);
    }
}
