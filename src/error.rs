use thiserror::Error;

/// Coarse error taxonomy used when logging at poll and handler boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Backend fetch/post failed.
    Network,
    /// Chain provider or wallet call failed, or returned malformed content.
    Chain,
    /// An expected object or contract field was absent.
    LogicalState,
    /// Invalid configuration.
    Config,
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Network error: {detail}")]
    Network {
        detail: String,
        #[source]
        source: Option<reqwest::Error>,
    },
    #[error("Chain error: {detail}")]
    Chain { detail: String },
    #[error("Decode error: {detail}")]
    Decode {
        detail: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Logical state error: {detail}")]
    LogicalState { detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
}

impl ClientError {
    pub fn network(detail: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Network {
            detail: detail.into(),
            source: Some(source),
        }
    }

    /// Network failure without an underlying transport error (e.g. non-2xx status).
    pub fn network_status(detail: impl Into<String>) -> Self {
        Self::Network {
            detail: detail.into(),
            source: None,
        }
    }

    pub fn chain(detail: impl Into<String>) -> Self {
        Self::Chain {
            detail: detail.into(),
        }
    }

    pub fn decode(detail: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Decode {
            detail: detail.into(),
            source,
        }
    }

    pub fn logical(detail: impl Into<String>) -> Self {
        Self::LogicalState {
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    /// Taxonomy bucket for this error. Decode failures count as chain
    /// failures: the provider returned something the client cannot read.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network { .. } => ErrorKind::Network,
            ClientError::Chain { .. } | ClientError::Decode { .. } => ErrorKind::Chain,
            ClientError::LogicalState { .. } => ErrorKind::LogicalState,
            ClientError::Config { .. } => ErrorKind::Config,
        }
    }
}
