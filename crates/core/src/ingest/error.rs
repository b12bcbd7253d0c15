use reqwest::StatusCode;
use std::fmt;

/// Non-2xx answer from the chart service. The body is kept verbatim for diagnostics and never
/// parsed.
#[derive(Debug, Clone)]
pub struct ChartServiceError {
    pub status: StatusCode,
    pub body: Option<String>,
}

impl fmt::Display for ChartServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "chart service HTTP {}", self.status)
    }
}

impl std::error::Error for ChartServiceError {}
