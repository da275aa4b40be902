//! Gated command-source endpoint.

use axum::http::header;

/// GET /code
///
/// The api-key middleware has already validated the credential. The body is
/// the obf command handler's source, embedded at compile time, so it is
/// byte-identical across requests.
pub async fn get_code() -> ([(header::HeaderName, &'static str); 1], &'static str) {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        shroud_bot::OBF_COMMAND_SOURCE,
    )
}
