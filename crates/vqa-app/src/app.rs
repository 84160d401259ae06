use std::io::{self, BufRead, Write};

use vqa_io::CameraBackend;
use vqa_model::VqaModel;
use vqa_pipeline::Session;

use crate::command::{Command, HELP};
use crate::present::render_records;
use crate::preview::Preview;

/// Line that ends the question input.
const END_OF_QUESTIONS: &str = ".";

pub enum Flow {
    Continue,
    Quit,
}

/// The terminal front-end: reads commands, drives the session, prints results.
///
/// Every pipeline error is printed and the prompt comes back.
pub struct App<'a, B: CameraBackend, M: VqaModel> {
    camera: B,
    model: &'a mut M,
    session: Session,
    preview: Option<Box<dyn Preview>>,
}

impl<'a, B: CameraBackend, M: VqaModel> App<'a, B, M> {
    pub fn new(camera: B, model: &'a mut M, preview: Option<Box<dyn Preview>>) -> Self {
        Self {
            camera,
            model,
            session: Session::new(),
            preview,
        }
    }

    /// Run the prompt loop until `quit` or the end of the input.
    pub fn run(&mut self, input: &mut impl BufRead, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "{HELP}")?;
        loop {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }

            if let Flow::Quit = self.handle(Command::parse(&line), input, out)? {
                break;
            }
        }
        Ok(())
    }

    pub fn handle(
        &mut self,
        command: Command,
        input: &mut impl BufRead,
        out: &mut impl Write,
    ) -> io::Result<Flow> {
        match command {
            Command::Capture => match self.session.capture(&mut self.camera) {
                Ok(image) => {
                    writeln!(out, "Captured {} image", image.size())?;
                    if let Some(preview) = self.preview.as_mut() {
                        preview.show_image(image);
                    }
                }
                Err(e) => writeln!(out, "Error: {e}")?,
            },
            Command::Ask => {
                writeln!(
                    out,
                    "Enter your questions (one per line), finish with '{END_OF_QUESTIONS}':"
                )?;
                let text = read_questions(input)?;
                match self.session.ask(&mut *self.model, &text) {
                    Ok(records) => {
                        let rendered = render_records(records);
                        writeln!(out, "Answers:\n{rendered}")?;
                        if let Some(preview) = self.preview.as_mut() {
                            preview.show_answers(&rendered);
                        }
                    }
                    Err(e) => writeln!(out, "Error: {e}")?,
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }
}

/// Collect lines up to the terminator line or the end of the input.
fn read_questions(input: &mut impl BufRead) -> io::Result<String> {
    let mut text = String::new();
    loop {
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 || line.trim_end() == END_OF_QUESTIONS {
            break;
        }
        text.push_str(&line);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use vqa_image::{Image, ImageSize};
    use vqa_io::{CameraDevice, CaptureError, ChannelOrder, Frame};

    use super::*;

    struct StillCamera {
        plugged: bool,
    }

    struct StillDevice;

    impl CameraBackend for StillCamera {
        type Device = StillDevice;

        fn open(&mut self, _index: u32) -> Result<StillDevice, CaptureError> {
            if self.plugged {
                Ok(StillDevice)
            } else {
                Err(CaptureError::DeviceUnavailable("unplugged".into()))
            }
        }
    }

    impl CameraDevice for StillDevice {
        fn read_frame(&mut self) -> Result<Frame, CaptureError> {
            Ok(Frame::new(
                ImageSize::from([2, 2]),
                ChannelOrder::Bgr,
                vec![0; 12],
            ))
        }
    }

    /// Answers "yes" and fails on questions mentioning "crash".
    struct YesModel;

    impl VqaModel for YesModel {
        type Input = bool;
        type Error = io::Error;

        fn encode(&mut self, _image: &Image<u8, 3>, question: &str) -> Result<bool, io::Error> {
            Ok(question.contains("crash"))
        }

        fn generate(&mut self, crash: bool) -> Result<Vec<u32>, io::Error> {
            if crash {
                return Err(io::Error::new(io::ErrorKind::Other, "generation failed"));
            }
            Ok(vec![1])
        }

        fn decode(&self, _tokens: &[u32]) -> Result<String, io::Error> {
            Ok("yes".to_string())
        }
    }

    fn run_script(plugged: bool, script: &str) -> io::Result<String> {
        let mut model = YesModel;
        let mut app = App::new(StillCamera { plugged }, &mut model, None);
        let mut out = Vec::new();
        app.run(&mut Cursor::new(script), &mut out)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    #[test]
    fn capture_then_ask() -> io::Result<()> {
        let out = run_script(true, "c\na\nIs it dark?\n\ncrash now\n.\nq\n")?;

        assert!(out.contains("Captured 2x2 image"));
        assert!(out.contains(
            "Answers:\nQ: Is it dark?\nA: yes\n\nQ: crash now\nA: [Could not generate an answer: generation failed]"
        ));
        Ok(())
    }

    #[test]
    fn ask_before_capture_reports_error() -> io::Result<()> {
        let out = run_script(true, "a\nWhat?\n.\n")?;
        assert!(out.contains("Error: No image captured"));
        Ok(())
    }

    #[test]
    fn blank_questions_report_error() -> io::Result<()> {
        let out = run_script(true, "c\na\n\n   \n.\n")?;
        assert!(out.contains("Error: No questions provided"));
        Ok(())
    }

    #[test]
    fn capture_failure_keeps_prompt_alive() -> io::Result<()> {
        let out = run_script(false, "c\nhelp\n")?;
        assert!(out.contains("Error: Could not open webcam: unplugged"));
        assert_eq!(out.matches("> ").count(), 3);
        Ok(())
    }

    #[test]
    fn read_questions_stops_at_terminator() -> io::Result<()> {
        let text = read_questions(&mut Cursor::new("a\nb\n.\nc\n"))?;
        assert_eq!(text, "a\nb\n");

        let text = read_questions(&mut Cursor::new("a"))?;
        assert_eq!(text, "a");
        Ok(())
    }
}
