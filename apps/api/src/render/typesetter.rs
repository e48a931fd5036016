//! Typesetting backend boundary.
//!
//! The fitter only ever sees the `Typesetter` trait: filled document text in,
//! page count and artifact out. `PdfLatexTypesetter` shells out to pdflatex in
//! a scratch directory; tests substitute scripted fakes through `AppState`.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::process::Command;
use tracing::debug;

use crate::errors::AppError;

/// Matches pdflatex's closing summary line, e.g.
/// `Output written on resume.pdf (2 pages, 58324 bytes).`
static PAGE_COUNT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"Output written on .*\((\d+) pages?").expect("page pattern is valid"));

const TEX_FILE_NAME: &str = "resume.tex";
const PDF_FILE_NAME: &str = "resume.pdf";

/// Successful typesetting run: how many pages came out, plus the backend's
/// full textual log for diagnostics.
#[derive(Debug, Clone)]
pub struct TypesetOutput {
    pub page_count: u32,
    pub log: String,
}

/// External typesetting backend. Accepts filled template text, writes the
/// rendered PDF to `output_path`, and reports the page count — or fails on
/// non-zero exit, unparseable output, or timeout.
#[async_trait]
pub trait Typesetter: Send + Sync {
    async fn compile(&self, tex_source: &str, output_path: &Path)
        -> Result<TypesetOutput, AppError>;
}

/// Shells out to pdflatex with a per-invocation wall-clock cap.
pub struct PdfLatexTypesetter {
    bin: String,
    timeout: Duration,
}

impl PdfLatexTypesetter {
    pub fn new(bin: impl Into<String>, timeout: Duration) -> Self {
        PdfLatexTypesetter {
            bin: bin.into(),
            timeout,
        }
    }
}

#[async_trait]
impl Typesetter for PdfLatexTypesetter {
    async fn compile(
        &self,
        tex_source: &str,
        output_path: &Path,
    ) -> Result<TypesetOutput, AppError> {
        let workdir = tempfile::tempdir()
            .map_err(|e| AppError::Typesetting(format!("Failed to create scratch dir: {e}")))?;

        let tex_path = workdir.path().join(TEX_FILE_NAME);
        tokio::fs::write(&tex_path, tex_source)
            .await
            .map_err(|e| AppError::Typesetting(format!("Failed to write tex source: {e}")))?;

        let invocation = Command::new(&self.bin)
            .arg("-interaction=nonstopmode")
            .arg("-halt-on-error")
            .arg(TEX_FILE_NAME)
            .current_dir(workdir.path())
            .output();

        let output = tokio::time::timeout(self.timeout, invocation)
            .await
            .map_err(|_| {
                AppError::Typesetting(format!(
                    "{} timed out after {:?}",
                    self.bin, self.timeout
                ))
            })?
            .map_err(|e| AppError::Typesetting(format!("Failed to spawn {}: {e}", self.bin)))?;

        let log = format!(
            "{}{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );

        if !output.status.success() {
            return Err(AppError::Typesetting(format!(
                "{} exited with {}: {}",
                self.bin,
                output.status,
                log_tail(&log)
            )));
        }

        let page_count = parse_page_count(&log).ok_or_else(|| {
            AppError::Typesetting(format!(
                "Page count not found in {} output: {}",
                self.bin,
                log_tail(&log)
            ))
        })?;

        if let Some(parent) = output_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::Typesetting(format!("Failed to create output dir: {e}")))?;
        }
        tokio::fs::copy(workdir.path().join(PDF_FILE_NAME), output_path)
            .await
            .map_err(|e| AppError::Typesetting(format!("Failed to copy PDF artifact: {e}")))?;

        debug!(page_count, output = %output_path.display(), "Typesetting succeeded");

        Ok(TypesetOutput { page_count, log })
    }
}

/// Extracts the page count from the backend's textual output.
pub(crate) fn parse_page_count(log: &str) -> Option<u32> {
    PAGE_COUNT_PATTERN
        .captures(log)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
}

/// Last slice of a long log, enough to carry the actual error message.
fn log_tail(log: &str) -> &str {
    const TAIL: usize = 2000;
    let mut start = log.len().saturating_sub(TAIL);
    // Don't split a UTF-8 sequence.
    while start < log.len() && !log.is_char_boundary(start) {
        start += 1;
    }
    &log[start..]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_page() {
        let log = "Output written on resume.pdf (1 page, 24576 bytes).";
        assert_eq!(parse_page_count(log), Some(1));
    }

    #[test]
    fn test_parse_multiple_pages() {
        let log = "Output written on resume.pdf (3 pages, 58324 bytes).";
        assert_eq!(parse_page_count(log), Some(3));
    }

    #[test]
    fn test_parse_finds_line_inside_full_log() {
        let log = "This is pdfTeX, Version 3.141592653\n\
                   (./resume.tex\nLaTeX2e <2023-11-01>\n\
                   [1{/var/lib/texmf/fonts}] [2]\n\
                   Output written on resume.pdf (2 pages, 40210 bytes).\n\
                   Transcript written on resume.log.";
        assert_eq!(parse_page_count(log), Some(2));
    }

    #[test]
    fn test_parse_missing_summary_is_none() {
        let log = "! Undefined control sequence.\nl.12 \\badmacro";
        assert_eq!(parse_page_count(log), None);
    }

    #[test]
    fn test_parse_empty_log_is_none() {
        assert_eq!(parse_page_count(""), None);
    }

    #[test]
    fn test_log_tail_short_log_is_whole_log() {
        assert_eq!(log_tail("short"), "short");
    }

    #[test]
    fn test_log_tail_truncates_long_log() {
        let log = "x".repeat(5000);
        assert_eq!(log_tail(&log).len(), 2000);
    }
}
