//! Authentication: provider error classification and the sign-in flow.
//!
//! - [`codes`]: the closed set of provider error codes and their messages
//! - [`response`]: the `{ data, error }` envelope returned by the provider
//! - [`messages`]: mapping errors to user-facing text
//! - [`flow`]: the loading-state machine behind the sign-in forms
//! - [`client`]: the provider client seam and its HTTP implementation

pub mod client;
pub mod codes;
pub mod flow;
pub mod messages;
pub mod response;

use thiserror::Error;

pub use codes::ErrorCode;
pub use response::{AuthOutcome, AuthResponse, ErrorDetail};

/// Failures of the provider call itself.
///
/// Provider-side rejections are not errors here; they arrive as
/// [`AuthResponse::failure`].
#[derive(Debug, Error)]
pub enum AuthClientError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),
}
