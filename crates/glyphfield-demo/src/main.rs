#![forbid(unsafe_code)]

//! glyphfield terminal host binary entry point.

use glyphfield_demo::{app, cli, telemetry};

fn main() {
    let opts = cli::Opts::parse();

    if let Err(e) = telemetry::init(&opts.log_file) {
        eprintln!("Failed to initialize logging: {e}");
        std::process::exit(1);
    }

    match app::run(&opts) {
        Ok(stats) => {
            if opts.exit_after_ms > 0 {
                println!(
                    "frames={} scramble_frames={} cells_drawn={} rebuilds={}",
                    stats.frames, stats.scramble_frames, stats.cells_drawn, stats.rebuilds
                );
            }
        }
        Err(e) => {
            eprintln!("Runtime error: {e}");
            std::process::exit(1);
        }
    }
}
