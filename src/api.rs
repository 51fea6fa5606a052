use crate::analyzer::ShopAnalysis;
use crate::engine::Engine;
use crate::error::SourceError;
use crate::source::ListingSource;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// ========== Request/Response Types ==========

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub shops: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl ApiResponse<()> {
    fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message),
        }
    }
}

// ========== Error Handling ==========

struct AppError(SourceError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            SourceError::NotFound { .. } => StatusCode::NOT_FOUND,
            SourceError::Upstream { .. } | SourceError::Connectivity(_) => {
                StatusCode::BAD_GATEWAY
            }
        };
        let message = self.0.to_string();
        if status.is_server_error() {
            tracing::error!("API error: {}", message);
        }

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

impl From<SourceError> for AppError {
    fn from(err: SourceError) -> Self {
        Self(err)
    }
}

// ========== Handlers ==========

async fn health_check() -> impl IntoResponse {
    Json(ApiResponse::success("OK"))
}

async fn shop_top_words<S: ListingSource + 'static>(
    State(engine): State<Arc<Engine<S>>>,
    Path(shop): Path<String>,
) -> Result<Json<ApiResponse<ShopAnalysis>>, AppError> {
    let analysis = engine.analyze_shop(&shop).await?;
    if !analysis.is_found() {
        return Err(SourceError::not_found(&shop).into());
    }
    Ok(Json(ApiResponse::success(analysis)))
}

async fn analyze_shops<S: ListingSource + 'static>(
    State(engine): State<Arc<Engine<S>>>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<ApiResponse<Vec<ShopAnalysis>>>, AppError> {
    let analyses = engine.analyze_shops(&req.shops).await?;
    Ok(Json(ApiResponse::success(analyses)))
}

// ========== Router ==========

pub fn create_router<S: ListingSource + 'static>(engine: Arc<Engine<S>>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/shops/:shop/top-words", get(shop_top_words::<S>))
        .route("/analyze", post(analyze_shops::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(engine)
}
