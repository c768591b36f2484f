use reqwest::StatusCode;

/// Failures reported by the remote APIs themselves.
///
/// Transport and decoding errors are passed through `anyhow` unchanged; these
/// variants cover replies that arrived but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{service} API error: {status} - {body}")]
    Status {
        service: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{service} response is missing field `{field}`")]
    MissingField {
        service: &'static str,
        field: &'static str,
    },
}

impl ApiError {
    /// Builds a [`ApiError::Status`] from a non-success response, consuming its body.
    pub async fn from_response(service: &'static str, response: reqwest::Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        ApiError::Status {
            service,
            status,
            body,
        }
    }
}
