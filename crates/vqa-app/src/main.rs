use argh::FromArgs;

use vqa_io::gstreamer::GstCameraBackend;
use vqa_model::paligemma::PaligemmaConfig;
use vqa_model::shared;

mod app;
mod command;
mod present;
mod preview;

use app::App;
use preview::{Preview, RerunPreview};

#[derive(FromArgs)]
/// Capture a webcam image and ask questions about it
struct Args {
    /// the maximum length of each generated answer
    #[argh(option, default = "32")]
    sample_length: usize,

    /// the seed used when sampling answers
    #[argh(option, default = "299792458")]
    seed: u64,

    /// show captures and answers in a rerun viewer
    #[argh(switch)]
    rerun: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // load the model once for the whole process
    let config = PaligemmaConfig {
        seed: args.seed,
        sample_len: args.sample_length,
        ..Default::default()
    };
    let model = shared::init(config)?;
    let mut model = shared::lock(model)?;

    // gstreamer problems are reported per capture at the prompt
    let camera = GstCameraBackend::new();

    let preview = if args.rerun {
        Some(Box::new(RerunPreview::spawn()?) as Box<dyn Preview>)
    } else {
        None
    };

    let mut app = App::new(camera, &mut *model, preview);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    app.run(&mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
