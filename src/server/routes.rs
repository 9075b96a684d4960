// ============================================================
// Layer 1 — HTTP Route Handlers
// ============================================================
// One handler per route. Every failure inside the prediction
// handler — unreadable upload, missing field, undecodable
// image, model failure — is converted by one blanket helper
// into HTTP 500 with a single message shape:
//
//   {"message": "Error processing image: <text>"}
//
// There is deliberately no error taxonomy here: the clients of
// this endpoint retry or surface the message as-is.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Json,
};
use serde::Serialize;

use crate::domain::traits::DigitClassifier;
use crate::server::AppState;

/// The multipart field the uploaded image arrives in.
const UPLOAD_FIELD: &str = "file";

// ─── Response Types ───────────────────────────────────────────────────────────

/// Static greeting returned by GET /
#[derive(Serialize)]
pub struct GreetingResponse {
    pub message: &'static str,
}

/// Health payload returned by GET /health
#[derive(Serialize)]
pub struct HealthResponse {
    pub status:  &'static str,
    pub version: &'static str,
}

/// Successful prediction returned by POST /predict/
#[derive(Serialize)]
pub struct PredictResponse {
    pub predicted_class: u8,
}

/// Blanket error payload for the prediction endpoint
#[derive(Serialize)]
pub struct ErrorMessage {
    pub message: String,
}

/// Convert any error into the endpoint's single 500 shape.
fn processing_error(err: impl std::fmt::Display) -> (StatusCode, Json<ErrorMessage>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorMessage {
            message: format!("Error processing image: {err}"),
        }),
    )
}

// ─── Handlers ─────────────────────────────────────────────────────────────────

/// GET / — static JSON greeting
pub async fn root() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: "MNIST Prediction API",
    })
}

/// GET /health — static health payload
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// POST /predict/ — multipart image upload → predicted digit
///
/// Walks the multipart fields looking for `file`, decodes and
/// preprocesses the bytes, and runs one forward pass.
pub async fn predict(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<PredictResponse>, (StatusCode, Json<ErrorMessage>)> {
    // Extract the image bytes from the multipart form
    let mut upload: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(processing_error)? {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field.bytes().await.map_err(processing_error)?;
            upload = Some(bytes.to_vec());
            break;
        }
    }

    let bytes = upload
        .ok_or_else(|| processing_error(format!("missing '{UPLOAD_FIELD}' field in upload")))?;

    // Decode + normalize to the model's input shape
    let image = state
        .preprocessor
        .prepare_bytes(&bytes)
        .map_err(processing_error)?;

    // One forward pass
    let model      = state.model.lock().await;
    let prediction = model.classify(&image).map_err(processing_error)?;

    tracing::info!(
        "Predicted {} (confidence {:.4})",
        prediction.digit, prediction.confidence,
    );

    Ok(Json(PredictResponse {
        predicted_class: prediction.digit,
    }))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_shape() {
        let (status, Json(body)) = processing_error("bad image");
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Error processing image: bad image");
    }

    #[test]
    fn test_predict_response_json_field() {
        let json = serde_json::to_string(&PredictResponse { predicted_class: 7 }).unwrap();
        assert_eq!(json, r#"{"predicted_class":7}"#);
    }

    #[test]
    fn test_greeting_json() {
        let json = serde_json::to_string(&GreetingResponse {
            message: "MNIST Prediction API",
        }).unwrap();
        assert_eq!(json, r#"{"message":"MNIST Prediction API"}"#);
    }
}
