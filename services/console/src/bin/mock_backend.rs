//! Mock detection backend for testing and demos
//!
//! Serves the five console endpoints with generated data. `/start` begins
//! appending ANN, hybrid, and IDS lines to in-memory streams; `/stop`
//! freezes them.
//!
//! Usage:
//!   mock_backend [--port PORT]
//!
//! The port can also be set via the MOCK_BACKEND_PORT environment variable.
//! Command line argument takes precedence over environment variable.
//! Default port is 7000 (same as the real backend).

use netwatch_console::demo::{build_router, new_demo_handle};

#[tokio::main]
async fn main() {
    // Port priority: command line arg > environment variable > default (7000)
    let args: Vec<String> = std::env::args().collect();
    let port = args
        .iter()
        .position(|a| a == "--port")
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
        .or_else(|| {
            std::env::var("MOCK_BACKEND_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
        })
        .unwrap_or(7000u16);

    eprintln!("Mock backend starting on port {}", port);

    let listener = match tokio::net::TcpListener::bind(("127.0.0.1", port)).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind to port {}: {}", port, e);
            std::process::exit(1);
        }
    };

    eprintln!("Mock backend listening on port {}", port);

    let router = build_router(new_demo_handle());
    if let Err(e) = axum::serve(listener, router).await {
        eprintln!("Mock backend failed: {}", e);
        std::process::exit(1);
    }
}
