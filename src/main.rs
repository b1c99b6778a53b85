//! diskgraph: live disk I/O graph in the terminal.
//!
//! Run: diskgraph <device>, e.g. `diskgraph sda` or `diskgraph /dev/nvme0n1`.

use std::io::IsTerminal;
use std::process::ExitCode;

use clap::Parser;

use diskgraph::{App, Config, Device, GraphError};

/// Graph disk read/write bandwidth and in-flight operations.
#[derive(Parser)]
#[command(name = "diskgraph", version, about, long_about = None)]
struct Cli {
    /// Block device to monitor, with or without a /dev/ prefix
    device: String,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors exit 1, distinct from the counter-source and
            // counter-format codes.
            let _ = err.print();
            return ExitCode::from(1);
        }
    };

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("diskgraph: {err}");
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<(), GraphError> {
    if !std::io::stdout().is_terminal() {
        return Err(GraphError::NotATerminal);
    }

    let device = Device::new(&cli.device);
    let mut app = App::new(Config::from_env(device));
    app.run()
}
