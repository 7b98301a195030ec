// Copyright 2025 the Doclink Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A failed backend call.
///
/// Every failure carries an HTTP-style status and a human-readable message.
/// Callers that only show the failure to a user read [`message`](Self::message).
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// The database could not be reached or refused the credentials.
    #[error("connection failed: {message}")]
    Connection {
        /// Driver message.
        message: String,
    },
    /// The request was missing a required field.
    #[error("bad request: {message}")]
    BadRequest {
        /// What was missing.
        message: String,
    },
    /// Any other non-success response.
    #[error("backend error {status}: {message}")]
    Status {
        /// Status code.
        status: u16,
        /// Server message.
        message: String,
    },
}

impl BackendError {
    /// Creates a [`BackendError::Connection`].
    #[must_use]
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Creates a [`BackendError::BadRequest`].
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Status code of the failure.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            Self::Connection { .. } => 500,
            Self::BadRequest { .. } => 400,
            Self::Status { status, .. } => *status,
        }
    }

    /// Human-readable message, without the status.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Connection { message }
            | Self::BadRequest { message }
            | Self::Status { message, .. } => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_and_message() {
        let err = BackendError::bad_request("collection is required");
        assert_eq!(err.status(), 400);
        assert_eq!(err.message(), "collection is required");
        assert_eq!(err.to_string(), "bad request: collection is required");

        let err = BackendError::Status {
            status: 503,
            message: "shutting down".into(),
        };
        assert_eq!(err.status(), 503);
        assert_eq!(err.message(), "shutting down");
        assert_eq!(BackendError::connection("refused").status(), 500);
    }
}
