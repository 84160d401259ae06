use candle_core::{DType, Device, Tensor};
use candle_transformers::generation::LogitsProcessor;
use candle_transformers::models::paligemma::Model;

use crate::paligemma::PaligemmaError;

pub struct TextGenerationConfig {
    pub seed: u64,
    pub temp: Option<f64>,
    pub top_p: Option<f64>,
    pub repeat_penalty: f32,
    pub repeat_last_n: usize,
}

pub struct TextGeneration {
    model: Model,
    device: Device,
    eos_token: u32,
    config: TextGenerationConfig,
}

impl TextGeneration {
    pub fn new(model: Model, device: Device, eos_token: u32, config: TextGenerationConfig) -> Self {
        Self {
            model,
            device,
            eos_token,
            config,
        }
    }

    #[inline]
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Generate up to `sample_len` tokens after the prompt, stopping at `<eos>`.
    ///
    /// Returns only the generated ids; the prompt and `<eos>` are not included.
    pub fn run(
        &mut self,
        image: &Tensor,
        prompt_ids: &[u32],
        sample_len: usize,
    ) -> Result<Vec<u32>, PaligemmaError> {
        // each question starts from an empty cache and a freshly seeded sampler
        self.model.clear_kv_cache();
        let mut logits_processor =
            LogitsProcessor::new(self.config.seed, self.config.temp, self.config.top_p);

        let mut tokens = prompt_ids.to_vec();
        let mut generated = Vec::with_capacity(sample_len);

        let start_gen = std::time::Instant::now();
        for index in 0..sample_len {
            let context_size = if index > 0 { 1 } else { tokens.len() };
            let start_pos = tokens.len().saturating_sub(context_size);
            let ctxt = &tokens[start_pos..];
            let input = Tensor::new(ctxt, &self.device)?.unsqueeze(0)?;
            let logits = if index > 0 {
                self.model.forward(&input)?
            } else {
                self.model.setup(image, &input)?
            };
            let logits = logits.squeeze(0)?.squeeze(0)?.to_dtype(DType::F32)?;
            let logits = if self.config.repeat_penalty == 1. {
                logits
            } else {
                let start_at = tokens.len().saturating_sub(self.config.repeat_last_n);
                candle_transformers::utils::apply_repeat_penalty(
                    &logits,
                    self.config.repeat_penalty,
                    &tokens[start_at..],
                )?
            };

            let next_token = logits_processor.sample(&logits)?;
            if next_token == self.eos_token {
                break;
            }
            tokens.push(next_token);
            generated.push(next_token);
        }

        let dt = start_gen.elapsed();
        log::debug!(
            "{} tokens generated ({:.2} token/s)",
            generated.len(),
            generated.len() as f64 / dt.as_secs_f64(),
        );

        Ok(generated)
    }
}
