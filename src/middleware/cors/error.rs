use std::fmt;

/// CORS configuration error
///
/// Returned by [`CorsConfig::validate`](super::CorsConfig::validate) and
/// [`CorsConfigBuilder::build`](super::CorsConfigBuilder::build) when a policy cannot be
/// honoured as written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsConfigError {
    /// Invalid origin format
    ///
    /// The origin is neither `*` nor `scheme://host[:port]`.
    InvalidOriginFormat {
        /// The invalid origin string
        origin: String,
    },
    /// A configured method is not a valid HTTP method token
    InvalidMethod {
        /// The rejected method string
        method: String,
    },
    /// Empty origins list with credentials
    ///
    /// When `allow_credentials` is `true`, at least one origin must be specified.
    EmptyOriginsWithCredentials,
}

impl fmt::Display for CorsConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorsConfigError::InvalidOriginFormat { origin } => {
                write!(
                    f,
                    "CORS configuration error: Invalid origin format '{}'. \
                    Expected '*' or scheme://host[:port] (e.g., https://example.com)",
                    origin
                )
            }
            CorsConfigError::InvalidMethod { method } => {
                write!(
                    f,
                    "CORS configuration error: '{}' is not a valid HTTP method",
                    method
                )
            }
            CorsConfigError::EmptyOriginsWithCredentials => {
                write!(
                    f,
                    "CORS configuration error: Cannot use credentials with empty origins list. \
                    When allow_credentials is true, at least one origin must be specified."
                )
            }
        }
    }
}

impl std::error::Error for CorsConfigError {}
