//! Transport error normalization.

use crate::error::SETUP_FAILURE_MESSAGE;
use crate::transport::TransportError;
use crate::Error;

/// Map a transport failure onto the SDK error.
///
/// A response always wins over a request: if the remote end answered, the
/// failure is an [`Error::Api`] even when the request is also known. A request
/// without a response is an [`Error::Timeout`]; neither is [`Error::Setup`].
pub fn normalize(error: TransportError) -> Error {
    let TransportError {
        message: transport_message,
        request,
        response,
    } = error;

    match (response, request) {
        (Some(response), request) => {
            let message = response
                .data
                .get("message")
                .and_then(|v| v.as_str())
                .map(String::from)
                .unwrap_or(transport_message);
            let details = response
                .data
                .get("details")
                .and_then(|v| v.as_array())
                .cloned();
            Error::Api {
                message,
                status: response.status,
                details,
                request,
                response,
            }
        }
        (None, Some(request)) => Error::Timeout { request },
        (None, None) => Error::Setup {
            message: SETUP_FAILURE_MESSAGE.to_string(),
        },
    }
}
