use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde::Deserialize;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::formats::{ErrorResponse, SearchResponse};
use crate::provider::BookSearchProvider;
use crate::search::{SearchError, search_books};

pub const SEARCH_FAILED_MESSAGE: &str = "도서 검색에 실패했습니다.";
pub const EMPTY_QUERY_MESSAGE: &str = "검색어를 입력해 주세요.";

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn BookSearchProvider>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "ok\n" }))
        .route("/api/search", get(search_handler))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_owned(),
        }),
    )
}

async fn search_handler(
    State(state): State<AppState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<SearchResponse>, ApiError> {
    match search_books(state.provider.as_ref(), &q.q).await {
        Ok(books) => Ok(Json(SearchResponse { books })),
        Err(SearchError::EmptyQuery) => {
            Err(api_error(StatusCode::BAD_REQUEST, EMPTY_QUERY_MESSAGE))
        }
        Err(err @ SearchError::Upstream(_)) => {
            tracing::error!(error = %err, query = %q.q, "search request failed");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, SEARCH_FAILED_MESSAGE))
        }
    }
}
