use gst::prelude::*;
use vqa_image::ImageSize;

use crate::{
    capture::{CameraBackend, CameraDevice},
    error::CaptureError,
    frame::{ChannelOrder, Frame},
};

/// Returns a GStreamer pipeline description that delivers a single BGR frame
/// from the V4L2 camera with the given index.
///
/// # Arguments
///
/// * `index` - The camera index, mapped to `/dev/video{index}`.
pub fn v4l2_single_frame_pipeline_description(index: u32) -> String {
    format!(
        "v4l2src device=/dev/video{index} num-buffers=1 ! \
        videoconvert ! video/x-raw,format=BGR ! \
        appsink name=sink sync=false max-buffers=1 drop=true"
    )
}

/// A camera backend for V4L2 devices built on GStreamer.
pub struct GstCameraBackend {
    timeout: gst::ClockTime,
}

impl GstCameraBackend {
    /// Create a backend.
    ///
    /// GStreamer is initialized on the first capture, so a missing installation
    /// surfaces as a capture error. Opening the device and reading the frame each
    /// wait at most five seconds.
    pub fn new() -> Self {
        Self {
            timeout: gst::ClockTime::from_seconds(5),
        }
    }
}

impl Default for GstCameraBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraBackend for GstCameraBackend {
    type Device = GstCameraDevice;

    fn open(&mut self, index: u32) -> Result<GstCameraDevice, CaptureError> {
        gst::init().map_err(|e| CaptureError::DeviceUnavailable(e.to_string()))?;

        let pipeline_desc = v4l2_single_frame_pipeline_description(index);
        log::debug!("opening camera with pipeline: {pipeline_desc}");

        let pipeline = gst::parse::launch(&pipeline_desc)
            .map_err(|e| CaptureError::DeviceUnavailable(e.to_string()))?
            .dynamic_cast::<gst::Pipeline>()
            .map_err(|_| CaptureError::DeviceUnavailable("failed to downcast pipeline".into()))?;

        let appsink = pipeline
            .by_name("sink")
            .ok_or_else(|| CaptureError::DeviceUnavailable("appsink not found".into()))?
            .dynamic_cast::<gst_app::AppSink>()
            .map_err(|_| CaptureError::DeviceUnavailable("failed to downcast appsink".into()))?;

        // from here on the pipeline is reset to Null when `device` is dropped
        let device = GstCameraDevice {
            pipeline,
            appsink,
            timeout: self.timeout,
        };

        device
            .pipeline
            .set_state(gst::State::Playing)
            .map_err(|_| CaptureError::DeviceUnavailable(device.bus_error_or("state change")))?;

        let (res, _, _) = device.pipeline.state(self.timeout);
        res.map_err(|_| CaptureError::DeviceUnavailable(device.bus_error_or("state change")))?;

        Ok(device)
    }
}

/// A V4L2 camera held open by a running GStreamer pipeline.
pub struct GstCameraDevice {
    pipeline: gst::Pipeline,
    appsink: gst_app::AppSink,
    timeout: gst::ClockTime,
}

impl GstCameraDevice {
    /// The first error posted on the pipeline bus, or `fallback`.
    fn bus_error_or(&self, fallback: &str) -> String {
        self.pipeline
            .bus()
            .and_then(|bus| bus.pop_filtered(&[gst::MessageType::Error]))
            .and_then(|msg| match msg.view() {
                gst::MessageView::Error(err) => Some(err.error().to_string()),
                _ => None,
            })
            .unwrap_or_else(|| format!("{fallback} failed"))
    }
}

impl CameraDevice for GstCameraDevice {
    fn read_frame(&mut self) -> Result<Frame, CaptureError> {
        let sample = self
            .appsink
            .try_pull_sample(self.timeout)
            .ok_or_else(|| CaptureError::FrameReadError(self.bus_error_or("pull sample")))?;

        let caps = sample
            .caps()
            .ok_or_else(|| CaptureError::FrameReadError("sample has no caps".into()))?;

        let structure = caps
            .structure(0)
            .ok_or_else(|| CaptureError::FrameReadError("caps have no structure".into()))?;

        let height = structure
            .get::<i32>("height")
            .map_err(|e| CaptureError::FrameReadError(e.to_string()))? as usize;

        let width = structure
            .get::<i32>("width")
            .map_err(|e| CaptureError::FrameReadError(e.to_string()))? as usize;

        let buffer = sample
            .buffer()
            .ok_or_else(|| CaptureError::FrameReadError("sample has no buffer".into()))?
            .map_readable()
            .map_err(|e| CaptureError::FrameReadError(e.to_string()))?;

        let data = strip_row_padding(buffer.as_slice(), width, height)?;

        Ok(Frame::new(
            ImageSize { width, height },
            ChannelOrder::Bgr,
            data,
        ))
    }
}

impl Drop for GstCameraDevice {
    fn drop(&mut self) {
        if let Err(e) = self.pipeline.set_state(gst::State::Null) {
            log::warn!("failed to release camera pipeline: {e}");
        }
    }
}

// videoconvert aligns rows to 4 bytes, so BGR rows may carry padding
fn strip_row_padding(buf: &[u8], width: usize, height: usize) -> Result<Vec<u8>, CaptureError> {
    let row_len = width * 3;
    if height == 0 || buf.len() < row_len * height {
        return Err(CaptureError::FrameReadError(format!(
            "buffer of {} bytes is too small for a {width}x{height} frame",
            buf.len()
        )));
    }

    let stride = buf.len() / height;
    if stride == row_len {
        return Ok(buf[..row_len * height].to_vec());
    }

    let mut data = Vec::with_capacity(row_len * height);
    for row in buf.chunks(stride).take(height) {
        data.extend_from_slice(&row[..row_len]);
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_description_uses_device_index() {
        let desc = v4l2_single_frame_pipeline_description(2);
        assert!(desc.starts_with("v4l2src device=/dev/video2 num-buffers=1"));
        assert!(desc.contains("format=BGR"));
        assert!(desc.contains("appsink name=sink"));
    }

    #[test]
    fn missing_device_is_unavailable() {
        let mut backend = GstCameraBackend::new();
        assert!(matches!(
            crate::capture_from(&mut backend, 4242),
            Err(CaptureError::DeviceUnavailable(_))
        ));
    }

    #[test]
    fn strip_row_padding_removes_stride() -> Result<(), CaptureError> {
        // 1x2 BGR frame with rows padded to 4 bytes
        let buf = [1, 2, 3, 0, 4, 5, 6, 0];
        assert_eq!(strip_row_padding(&buf, 1, 2)?, vec![1, 2, 3, 4, 5, 6]);
        Ok(())
    }

    #[test]
    fn strip_row_padding_rejects_short_buffer() {
        let buf = [0u8; 5];
        assert!(matches!(
            strip_row_padding(&buf, 1, 2),
            Err(CaptureError::FrameReadError(_))
        ));
    }
}
