//! # Continuation Tokens
//!
//! A token is `base64url(JSON(SortSpec))`. It is opaque to clients and never stored
//! server-side; decoding re-validates the spec so that a tampered or foreign token
//! fails as a bad request rather than as a server error.

use crate::error::QueryError;
use crate::sort::{QueryField, SortSpec};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;

pub fn encode<F: QueryField>(spec: &SortSpec<F>) -> Result<String, QueryError> {
    let json = serde_json::to_vec(spec)
        .map_err(|e| QueryError::ServerError(format!("failed to encode cursor: {e}")))?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

pub fn decode<F: QueryField>(token: &str) -> Result<SortSpec<F>, QueryError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token.trim_end_matches('='))
        .map_err(|e| QueryError::BadRequest(format!("next token is not valid base64: {e}")))?;
    serde_json::from_slice(&bytes)
        .map_err(|e| QueryError::BadRequest(format!("next token is malformed: {e}")))
}
