//! Custom Axum extractors for request authentication.
//!
//! `SignedBody<T>` verifies the `Poolidx-Signature` header against the JSON
//! request body. All cryptographic operations are delegated to
//! [`poolidx_sdk::signature`].

use axum::{
    extract::{FromRequest, Request},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use poolidx_sdk::signature::{SIGNATURE_HEADER, Signature, SignatureError, SignedObject};

use crate::state::AppState;

/// Upper bound on a delivered event body.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// An Axum extractor that verifies the `Poolidx-Signature` header and
/// deserializes + authenticates the JSON request body.
///
/// # Header format
///
/// ```text
/// Poolidx-Signature: {unix_timestamp}.{base64_signature}
/// ```
///
/// The signature is computed as `HMAC-SHA256("{timestamp}.{json_body}", ingest_secret)`.
pub struct SignedBody<T: Signature>(pub T);

/// Errors that can occur during signed-body verification.
#[derive(Debug, thiserror::Error)]
pub enum SignedBodyError {
    #[error("missing Poolidx-Signature header")]
    MissingHeader,
    #[error("invalid Poolidx-Signature header format")]
    InvalidHeader,
    #[error("invalid signature encoding")]
    InvalidBase64,
    #[error("failed to read request body")]
    BodyReadError,
    #[error("invalid JSON body: {0}")]
    JsonError(serde_json::Error),
    #[error("signature verification failed")]
    VerificationFailed,
    #[error("signature expired")]
    Expired,
}

impl From<SignatureError> for SignedBodyError {
    fn from(err: SignatureError) -> Self {
        match err {
            SignatureError::InvalidFormat => Self::InvalidHeader,
            SignatureError::InvalidBase64 => Self::InvalidBase64,
            SignatureError::Json(e) => Self::JsonError(e),
            SignatureError::SignatureMismatch => Self::VerificationFailed,
            SignatureError::Expired => Self::Expired,
        }
    }
}

impl IntoResponse for SignedBodyError {
    fn into_response(self) -> Response {
        let status = match self {
            SignedBodyError::MissingHeader
            | SignedBodyError::InvalidHeader
            | SignedBodyError::InvalidBase64
            | SignedBodyError::VerificationFailed
            | SignedBodyError::Expired => StatusCode::UNAUTHORIZED,
            SignedBodyError::BodyReadError | SignedBodyError::JsonError(_) => {
                StatusCode::BAD_REQUEST
            }
        };
        tracing::debug!(error = %self, "Rejected signed body");
        (status, self.to_string()).into_response()
    }
}

impl<T: Signature + Send> FromRequest<AppState> for SignedBody<T> {
    type Rejection = SignedBodyError;

    async fn from_request(req: Request, state: &AppState) -> Result<Self, Self::Rejection> {
        let header_value = req
            .headers()
            .get(SIGNATURE_HEADER)
            .ok_or(SignedBodyError::MissingHeader)?
            .to_str()
            .map_err(|_| SignedBodyError::InvalidHeader)?
            .to_owned();

        let body_bytes = axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|_| SignedBodyError::BodyReadError)?;

        let json =
            String::from_utf8(body_bytes.to_vec()).map_err(|_| SignedBodyError::BodyReadError)?;

        let signed = SignedObject::<T>::from_header_and_body(&header_value, json)?;

        let ingest = state.config.ingest.read().await;
        let verified_body = signed.verify(ingest.secret_bytes())?;
        drop(ingest);

        Ok(SignedBody(verified_body))
    }
}
