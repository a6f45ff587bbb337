use std::fmt;

/// Errors raised while assembling routers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A [`MultiRouter`](super::MultiRouter) needs a distinguishing first path segment,
    /// so its base path may be neither empty nor `/`
    InvalidBasePath { base_path: String },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::InvalidBasePath { base_path } => write!(
                f,
                "invalid MultiRouter base path '{}': it cannot be empty or '/'; \
                use a single Router to serve from the root",
                base_path
            ),
        }
    }
}

impl std::error::Error for RouterError {}
