//! Circular Motion entry point
//!
//! Natively this runs the model headless: it steps a fixed number of ticks,
//! prints the speed readout and can dump the chart samples and the final
//! draw list. The browser build is driven through `WebSimulation` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::fs::File;
    use std::io::BufWriter;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;

    use circular_motion::renderer::{self, CanvasTransform};
    use circular_motion::sim::run_ticks;
    use circular_motion::{SimState, Settings};

    #[derive(Parser, Debug)]
    #[command(about = "Uniform circular motion with axis projections")]
    struct Args {
        /// Settings JSON file (defaults when omitted)
        #[arg(short, long)]
        settings: Option<PathBuf>,
        /// Ticks to run (defaults to one full period)
        #[arg(short, long)]
        ticks: Option<u64>,
        /// Write the chart samples to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the final draw list as JSON
        #[arg(long)]
        frames: bool,
        /// Map the printed draw list to canvas pixels
        #[arg(long)]
        canvas: bool,
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();

        let settings = Settings::load_file(args.settings.as_deref())
            .context("failed to load settings")?;
        settings.validate().context("settings out of range")?;

        let mut state = SimState::new(settings).context("failed to build the model")?;
        let ticks = args.ticks.unwrap_or(state.settings.period as u64);
        run_ticks(&mut state, ticks).context("simulation step failed")?;
        log::info!("Ran {} ticks", state.time_ticks);

        println!("{}", renderer::info_text(&state).replace("<br>", "\n"));

        if let Some(path) = &args.csv {
            let file = File::create(path)
                .with_context(|| format!("cannot create {}", path.display()))?;
            state.recorder.write_csv(BufWriter::new(file))?;
            log::info!("Wrote {} samples to {}", state.recorder.len(), path.display());
        }

        if args.frames {
            let mut list = renderer::render(&state);
            if args.canvas {
                let size = circular_motion::consts::CANVAS_SIZE;
                list = CanvasTransform::new(&state.space, size, size).draw_list(&list);
            }
            println!("{}", serde_json::to_string_pretty(&list)?);
        }

        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Circular motion (native) starting...");
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}
