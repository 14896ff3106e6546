//! Response classification shared by every client operation.

use crate::error::{ClassifiedError, TransportError};

/// Map a failed exchange to its caller-facing bucket. First match wins:
///
/// | status | transport error | result |
/// |--------|-----------------|--------|
/// | 4xx    | any             | `BadRequest` |
/// | 5xx    | any             | `ServerUnavailable` |
/// | none   | present         | `NoConnection` |
/// | otherwise |              | `Unhandled` |
pub fn classify(status: Option<u16>, transport_error: Option<&TransportError>) -> ClassifiedError {
    match (status, transport_error) {
        (Some(code), _) if code / 100 == 4 => ClassifiedError::BadRequest,
        (Some(code), _) if code / 100 == 5 => ClassifiedError::ServerUnavailable,
        (None, Some(_)) => ClassifiedError::NoConnection,
        _ => ClassifiedError::Unhandled,
    }
}
