use thiserror::Error;

/// Errors raised while starting or stopping the system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Configuration error: {0}")]
    Config(#[from] clap::Error),
    #[error("Tracing setup failed: {0}")]
    Telemetry(String),
    #[error("Actor task failed: {0}")]
    Shutdown(String),
}
