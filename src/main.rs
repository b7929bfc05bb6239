use std::process::ExitCode;

use tracing::error;
use umbra::{ViewerConfig, init_logging, run};

fn main() -> ExitCode {
    init_logging();

    let config = ViewerConfig::from_args(std::env::args().skip(1));
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "viewer stopped");
            ExitCode::FAILURE
        }
    }
}
