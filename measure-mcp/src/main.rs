//! Measure MCP Server
//!
//! MCP Server (protocol revision 2025-11-25) over line-delimited stdio.
//!
//! Tools:
//! - convert: Convert a value between two units
//! - convert_batch: Convert several values between the same units
//! - call: Call a conversion function by name
//! - list_units: List units, symbols and multipliers
//! - help: Get documentation for functions
//! - list_functions: List available functions
//!
//! Resources:
//! - measure://units/{category} - Unit table for a category
//!
//! Environment:
//! - MEASURE_SAME_UNIT: reject | identity
//! - MEASURE_DECIMALS: display precision (default 4)
//! - RUST_LOG: log filter, logs go to stderr

mod handlers;
mod protocol;

use measure_core::Settings;
use std::io::{self, BufRead, Write};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use handlers::Server;
use protocol::{McpResponse, PROTOCOL_VERSION, SERVER_VERSION};

fn main() {
    // stdout carries the protocol; logs go to stderr
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    let settings = Settings::from_env();
    let server = Server::new(settings);

    info!(version = SERVER_VERSION, protocol = PROTOCOL_VERSION, "Measure MCP server started");
    info!(same_unit = %settings.same_unit, decimals = settings.decimals, "settings loaded");

    let stdin = io::stdin();
    let mut reader = io::BufReader::new(stdin.lock());

    loop {
        let mut line = String::new();
        match reader.read_line(&mut line) {
            Ok(0) => {
                info!("client disconnected (EOF)");
                break;
            }
            Ok(_) => {
                if let Some(response) = server.handle_line(&line) {
                    if let Err(e) = send(&response) {
                        error!("error writing response: {}", e);
                        break;
                    }
                }
            }
            Err(e) => {
                error!("error reading input: {}", e);
                break;
            }
        }
    }

    info!("server shutting down");
}

fn send(response: &McpResponse) -> io::Result<()> {
    let json = serde_json::to_string(response).map_err(io::Error::other)?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()
}
