use std::path::PathBuf;
use std::process::ExitStatus;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("`{command}` failed with {status}")]
    CommandFailed { command: String, status: ExitStatus },
    #[error("`{0}` not found on PATH; install it first (wasm-pack: https://rustwasm.github.io/wasm-pack/installer/)")]
    ToolMissing(&'static str),
    #[error("invalid host address '{host}': {source}")]
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
    #[error("static directory '{}' does not exist or is not a directory", .0.display())]
    StaticDirMissing(PathBuf),
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("health check failed: HTTP {0}")]
    HealthCheck(u16),
}
