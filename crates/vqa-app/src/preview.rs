use vqa_image::Image;

/// Somewhere to show the latest capture and answers besides the terminal.
pub trait Preview {
    fn show_image(&mut self, image: &Image<u8, 3>);
    fn show_answers(&mut self, text: &str);
}

/// Logs captures and answers to a spawned rerun viewer.
pub struct RerunPreview {
    rec: rerun::RecordingStream,
}

impl RerunPreview {
    pub fn spawn() -> Result<Self, rerun::RecordingStreamError> {
        let rec = rerun::RecordingStreamBuilder::new("VQA Cam").spawn()?;
        Ok(Self { rec })
    }
}

impl Preview for RerunPreview {
    fn show_image(&mut self, image: &Image<u8, 3>) {
        let res = self.rec.log(
            "capture",
            &rerun::Image::from_elements(image.as_slice(), image.size().into(), rerun::ColorModel::RGB),
        );
        if let Err(e) = res {
            log::warn!("failed to log the capture to rerun: {e}");
        }
    }

    fn show_answers(&mut self, text: &str) {
        if let Err(e) = self.rec.log("answers", &rerun::TextDocument::new(text)) {
            log::warn!("failed to log the answers to rerun: {e}");
        }
    }
}
