use derive_more::Display;

/// Errors raised while preparing chart data or talking to the browser.
///
/// None of these ever reach the user as a failed render: callers log them
/// and fall back to a sanitized or empty chart.
#[derive(Debug, Clone, PartialEq, Display)]
pub enum ChartError {
    #[display(fmt = "Invalid value {} for '{}'", value, label)]
    InvalidValue { label: String, value: f64 },
    #[display(fmt = "Configuration error: {}", _0)]
    Config(String),
    #[display(fmt = "Browser API error: {}", _0)]
    BrowserApi(String),
}

impl std::error::Error for ChartError {}

impl From<serde_json::Error> for ChartError {
    fn from(err: serde_json::Error) -> Self {
        ChartError::Config(err.to_string())
    }
}

pub type ChartResult<T> = Result<T, ChartError>;
