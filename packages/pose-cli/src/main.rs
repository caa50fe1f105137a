use std::process::ExitCode;

use pose_cli::shell;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn main() -> ExitCode {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("POSE_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = pose_cli::run() {
        shell().error(format!("{err:#}"));
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
