use thiserror::Error;

pub type Result<T> = std::result::Result<T, NalssiError>;

/// Failures surfaced to callers of the client.
///
/// Missing sub-sections of a page are not errors; the extractors log those and
/// fall back to sentinel values instead.
#[derive(Debug, Error)]
pub enum NalssiError {
    /// The request never produced a response (DNS, TLS, connection reset, body read...).
    #[error("{context}: {source}")]
    FetchFailed {
        context: String,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered, but not with a success status.
    #[error("request to {url} failed with status {status}: {body}")]
    UnexpectedStatus {
        url: String,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{context}: {source}")]
    ParseFailed {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The page no longer has the layout the extractors rely on.
    #[error("weather page structure changed: {0}")]
    PageStructureChanged(String),

    #[error("location query must not be empty")]
    InvalidQuery,
}

impl NalssiError {
    pub(crate) fn fetch(context: impl Into<String>, source: reqwest::Error) -> Self {
        Self::FetchFailed { context: context.into(), source }
    }

    pub(crate) fn parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::ParseFailed { context: context.into(), source }
    }

    /// True for failures the UI reports as "data unavailable, choose a different location".
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            Self::FetchFailed { .. } | Self::UnexpectedStatus { .. } | Self::PageStructureChanged(_)
        )
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
