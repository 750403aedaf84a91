use serde::Serialize;
use thiserror::Error;

/// Failures while obtaining a document for a URL
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection reset, TLS, ...)
    #[error("Network error: {0}")]
    Network(String),

    /// Request exceeded its time bound
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The site answered HTTP 403, it actively rejects this request pattern
    #[error("Request was blocked by {0} (HTTP 403)")]
    Blocked(String),

    /// Any other non-success HTTP status
    #[error("Unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    /// The browser could not navigate to the page or find the marker element
    #[error("Navigation failed: {0}")]
    Navigation(String),

    /// A JSON API answered without the expected content
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),

    /// The browser could not be launched or driven
    #[error("Browser error: {0}")]
    Browser(String),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_decode() {
            FetchError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            let url = err.url().map(|u| u.to_string()).unwrap_or_default();
            if status == reqwest::StatusCode::FORBIDDEN {
                FetchError::Blocked(url)
            } else {
                FetchError::Status {
                    status: status.as_u16(),
                    url,
                }
            }
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

/// Errors returned by an extraction call
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The input could not be parsed as an absolute URL with a host
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The URL's host is not in the source table
    #[error("This site is not supported: {0}")]
    UnsupportedSource(String),

    /// Fetching the document failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The document was fetched but no row survived extraction
    #[error("No ingredients found at {0}")]
    NoIngredientsFound(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

/// Machine-distinguishable failure kind, stable across message wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidUrl,
    UnsupportedSource,
    FetchBlocked,
    FetchTimeout,
    FetchNetworkError,
    NoIngredientsFound,
    MalformedUpstreamResponse,
    Internal,
}

impl ExtractError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExtractError::InvalidUrl(_) => ErrorKind::InvalidUrl,
            ExtractError::UnsupportedSource(_) => ErrorKind::UnsupportedSource,
            ExtractError::NoIngredientsFound(_) => ErrorKind::NoIngredientsFound,
            ExtractError::Config(_) => ErrorKind::Internal,
            ExtractError::Fetch(err) => match err {
                FetchError::Blocked(_) => ErrorKind::FetchBlocked,
                FetchError::Timeout(_) => ErrorKind::FetchTimeout,
                FetchError::MalformedResponse(_) => ErrorKind::MalformedUpstreamResponse,
                FetchError::Network(_)
                | FetchError::Status { .. }
                | FetchError::Navigation(_) => ErrorKind::FetchNetworkError,
                FetchError::Browser(_) => ErrorKind::Internal,
            },
        }
    }

    /// HTTP status an API layer should answer with for this failure
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::InvalidUrl => 400,
            ErrorKind::FetchBlocked => 403,
            _ => 500,
        }
    }

    /// Short message suitable for showing to an end user
    pub fn user_message(&self) -> String {
        match self.kind() {
            ErrorKind::InvalidUrl => "The URL is not valid.".to_string(),
            ErrorKind::UnsupportedSource => "This site is not supported.".to_string(),
            ErrorKind::FetchBlocked => "The site refused the request.".to_string(),
            ErrorKind::FetchTimeout => "The site took too long to respond.".to_string(),
            ErrorKind::FetchNetworkError => "Failed to fetch the page.".to_string(),
            ErrorKind::NoIngredientsFound => "No ingredients could be found.".to_string(),
            ErrorKind::MalformedUpstreamResponse => {
                "The site returned an unexpected response.".to_string()
            }
            ErrorKind::Internal => format!("Unexpected error: {self}"),
        }
    }
}

/// JSON error envelope handed to the HTTP layer: `{ "error": "..." }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl From<&ExtractError> for ErrorBody {
    fn from(err: &ExtractError) -> Self {
        ErrorBody {
            error: err.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_maps_to_403() {
        let err = ExtractError::from(FetchError::Blocked("https://cookpad.com/".to_string()));
        assert_eq!(err.kind(), ErrorKind::FetchBlocked);
        assert_eq!(err.status_code(), 403);
    }

    #[test]
    fn test_unsupported_and_empty_map_to_500() {
        let unsupported = ExtractError::UnsupportedSource("example.com".to_string());
        let empty = ExtractError::NoIngredientsFound("https://cookien.com/x/".to_string());

        assert_eq!(unsupported.status_code(), 500);
        assert_eq!(empty.status_code(), 500);
        assert_ne!(unsupported.kind(), empty.kind());
    }

    #[test]
    fn test_invalid_url_maps_to_400() {
        let err = ExtractError::InvalidUrl("not a url".to_string());
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_error_body_serializes_message() {
        let err = ExtractError::UnsupportedSource("example.com".to_string());
        let body = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "This site is not supported." }));
    }

    #[test]
    fn test_status_and_navigation_are_network_errors() {
        let status = ExtractError::from(FetchError::Status {
            status: 404,
            url: "https://delishkitchen.tv/recipes/1".to_string(),
        });
        let nav = ExtractError::from(FetchError::Navigation("net::ERR_ABORTED".to_string()));

        assert_eq!(status.kind(), ErrorKind::FetchNetworkError);
        assert_eq!(nav.kind(), ErrorKind::FetchNetworkError);
    }
}
