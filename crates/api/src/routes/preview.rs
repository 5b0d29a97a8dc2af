//! The stateless preview endpoint.
//!
//! ```text
//! POST /preview -> preview
//! ```
//!
//! Never touches the job registry and never rejects on body content:
//! an unparseable integrand comes back as an empty `expr` (the client
//! clears its preview area), and an unparseable bound falls back to its
//! raw text.

use axum::routing::post;
use axum::{Json, Router};

use integro_core::expr::parse_expression;
use integro_core::protocol::{PreviewRequest, PreviewResponse};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/preview", post(preview))
}

/// POST /api/v1/preview
async fn preview(Json(request): Json<PreviewRequest>) -> Json<PreviewResponse> {
    let variable = match request.variable.trim() {
        "" => "x",
        v => v,
    };

    let integrand = request.integrand.trim();
    let expr = if integrand.is_empty() {
        String::new()
    } else {
        parse_expression(integrand, variable)
            .map(|e| e.to_latex())
            .unwrap_or_default()
    };

    Json(PreviewResponse {
        expr,
        lower: normalize_bound(&request.lower, variable),
        upper: normalize_bound(&request.upper, variable),
    })
}

/// Normalized LaTeX when the bound parses, raw text when it does not,
/// empty when it is empty.
fn normalize_bound(raw: &str, variable: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }
    parse_expression(raw, variable)
        .map(|e| e.to_latex())
        .unwrap_or_else(|_| raw.to_string())
}
