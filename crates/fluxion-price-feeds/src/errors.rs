// Copyright (c) 2025 SOLARE S.R.O.
//
// This file is part of FluxION.
//
// Licensed under the Creative Commons Attribution-NonCommercial-NoDerivatives 4.0 International
// (CC BY-NC-ND 4.0). You may use and share this file for non-commercial purposes only and you may not
// create derivatives. See <https://creativecommons.org/licenses/by-nc-nd/4.0/>.
//
// This software is provided "AS IS", without warranty of any kind.
//
// For commercial licensing, please contact: info@solare.cz

use thiserror::Error;

/// Price feed error types
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Feed API returned error status {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Authentication failed")]
    AuthenticationFailed,

    #[error("Request rejected by feed: {0}")]
    Rejected(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl FeedError {
    /// True when the feed told us the credentials themselves are bad,
    /// as opposed to a transport or parsing problem.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::AuthenticationFailed | Self::Rejected(_))
    }
}

pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_rejection_classification() {
        assert!(FeedError::AuthenticationFailed.is_auth_rejection());
        assert!(FeedError::Rejected("no data".to_owned()).is_auth_rejection());
        assert!(!FeedError::InvalidResponse("empty".to_owned()).is_auth_rejection());
        assert!(
            !FeedError::ApiError {
                status: 503,
                message: String::new()
            }
            .is_auth_rejection()
        );
    }
}
