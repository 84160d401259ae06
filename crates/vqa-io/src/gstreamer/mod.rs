mod camera;

pub use camera::{v4l2_single_frame_pipeline_description, GstCameraBackend, GstCameraDevice};
