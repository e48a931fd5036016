use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails fast if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    /// Directory holding LaTeX templates (expects `basic.tex`).
    pub template_dir: String,
    /// Directory where compiled PDFs land, keyed by application id.
    pub output_dir: String,
    /// Typesetting binary. Defaults to `pdflatex` on PATH.
    pub pdflatex_bin: String,
    /// Wall-clock cap for a single typesetting invocation.
    pub typeset_timeout_secs: u64,
    /// Wall-clock cap for a whole compile (all fit iterations combined).
    pub compile_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            template_dir: std::env::var("TEMPLATE_DIR").unwrap_or_else(|_| "templates".to_string()),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or_else(|_| "public/pdfs".to_string()),
            pdflatex_bin: std::env::var("PDFLATEX_BIN").unwrap_or_else(|_| "pdflatex".to_string()),
            typeset_timeout_secs: env_u64("TYPESET_TIMEOUT_SECS", 30)?,
            compile_timeout_secs: env_u64("COMPILE_TIMEOUT_SECS", 300)?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_u64(key: &str, default: u64) -> Result<u64> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<u64>()
            .with_context(|| format!("{key} must be a non-negative integer")),
        Err(_) => Ok(default),
    }
}
