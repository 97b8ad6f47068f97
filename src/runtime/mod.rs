//! Startup plumbing shared by the API server and the console.

pub mod args;

pub use args::{parse_runtime_args, RuntimeArgs};

/// Installs the stderr `fmt` subscriber. `RUST_LOG` wins; unset or invalid
/// filters fall back to `info`.
pub fn init_tracing() {
    match std::env::var("RUST_LOG") {
        Ok(val) => eprintln!("[STARTUP] RUST_LOG is set to: '{}'", val),
        Err(_) => eprintln!("[STARTUP] RUST_LOG is unset."),
    }
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        eprintln!("[STARTUP] RUST_LOG invalid or unset; defaulting to 'info'");
        tracing_subscriber::EnvFilter::new("info")
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
