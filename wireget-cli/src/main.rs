use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wireget_transport::Error;

mod fetch;
mod request;

use fetch::Target;

/// wireget: minimal raw HTTP/1.1 GET client
///
/// Performs a single unencrypted GET request to port 80 and streams the raw
/// response (status line, headers, and body, undifferentiated) to stdout.
/// Progress and errors go to stderr. The connection is closed by the peer,
/// which is what ends the transfer; there is no timeout.
///
/// Example usage:
///   wireget www.example.com /index.html
///   wireget 127.0.0.1
#[derive(Debug, Parser)]
#[command(name = "wireget")]
#[command(version, about = "Minimal raw HTTP/1.1 GET client", long_about = None)]
struct Cli {
    /// Target host (name or IPv4/IPv6 literal)
    hostname: String,

    /// Request path, inserted verbatim into the GET line
    #[arg(default_value = request::DEFAULT_PATH)]
    path: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage errors exit 1; --help and --version exit 0.
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    // Logs must go to stderr: stdout carries the raw response bytes.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let target = Target {
        hostname: cli.hostname,
        path: cli.path,
    };

    tracing::info!("Interacting with server {}...", target.hostname);

    let mut stdout = io::stdout().lock();
    match fetch::fetch(&target, &mut stdout) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Receive(err)) => {
            // The one non-fatal path: whatever arrived before the error has
            // already been streamed out, and the connection is closed, so
            // the transfer still counts as completed.
            tracing::error!("error receiving response: {err}");
            let _ = stdout.flush();
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
