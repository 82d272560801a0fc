use std::process::ExitCode;
use std::sync::Arc;

use querymockd::transport::TRANSPORT_TARGET;
use querymockd::{StructuredHealthReporter, SystemConfigLoader, bootstrap_with};

#[tokio::main]
async fn main() -> ExitCode {
    let reporter = Arc::new(StructuredHealthReporter::new());
    let daemon = match bootstrap_with(&SystemConfigLoader, reporter) {
        Ok(daemon) => daemon,
        Err(error) => {
            eprintln!("querymockd: {error}");
            return ExitCode::FAILURE;
        }
    };
    match daemon.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(target: TRANSPORT_TARGET, error = %error, "server failed");
            eprintln!("querymockd: {error}");
            ExitCode::FAILURE
        }
    }
}
