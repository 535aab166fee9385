use thiserror::Error;

/// Errors that abort a draw call.
#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Parameter `charts` is not correctly structured: expected an object or an array")]
    InvalidCharts,

    #[error("Invalid subplot layout: chart count ({n_charts}) and max columns ({max_cols}) must be positive")]
    InvalidLayout { n_charts: usize, max_cols: usize },

    #[error("Attribute `{0}` not found in the chart style or the configuration")]
    MissingKey(String),

    #[error("Chart {index} has no `{attr}` data")]
    MissingSeries { attr: String, index: usize },

    #[error("Value of `{key}` is not a valid {expected}")]
    InvalidValue { key: String, expected: &'static str },

    #[error("Invalid chart attributes: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_key_message() {
        let err = ChartError::MissingKey("plot.line.color".to_string());
        assert!(err.to_string().contains("plot.line.color"));
    }

    #[test]
    fn test_invalid_layout_message() {
        let err = ChartError::InvalidLayout { n_charts: 0, max_cols: 4 };
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: ChartError = parse.unwrap_err().into();
        assert!(matches!(err, ChartError::Json(_)));
    }
}
