use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::gateway::error::GatewayError;
use crate::gateway::state::HandlerState;
use lostitem::constants::{DEFAULT_RANK_K, MAX_RANK_K};
use lostitem::embedding::EmbeddingProvider;
use lostitem::matcher::{MATCH_STATUS_HEADER, MatchResult, RankedAlias};

#[derive(Debug, Clone, Deserialize)]
pub struct MatchRequest {
    #[serde(rename = "type")]
    pub item_type: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidatesRequest {
    #[serde(rename = "type")]
    pub item_type: String,
    #[serde(default = "default_k")]
    pub k: usize,
}

fn default_k() -> usize {
    DEFAULT_RANK_K
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidatesResponse {
    pub candidates: Vec<RankedAlias>,
}

/// `POST /v1/match`. Always `200`; the outcome kind travels in the status header.
#[instrument(skip(state, request), fields(query_len = request.item_type.len()))]
pub async fn match_handler<P>(
    State(state): State<HandlerState<P>>,
    Json(request): Json<MatchRequest>,
) -> Response
where
    P: EmbeddingProvider + 'static,
{
    let result = state.matcher.find_closest_match(&request.item_type).await;
    make_match_response(result)
}

pub(crate) fn make_match_response(result: MatchResult) -> Response {
    let status = result.status();
    debug!(status = %status, code = %result.code, "Match served");

    let mut headers = HeaderMap::new();
    headers.insert(
        MATCH_STATUS_HEADER,
        HeaderValue::from_static(status.as_header_value()),
    );

    (StatusCode::OK, headers, Json(result)).into_response()
}

/// `POST /v1/candidates`.
#[instrument(skip(state, request), fields(query_len = request.item_type.len(), k = request.k))]
pub async fn candidates_handler<P>(
    State(state): State<HandlerState<P>>,
    Json(request): Json<CandidatesRequest>,
) -> Result<Response, GatewayError>
where
    P: EmbeddingProvider + 'static,
{
    if request.k == 0 || request.k > MAX_RANK_K {
        return Err(GatewayError::InvalidRequest(format!(
            "k must be between 1 and {MAX_RANK_K}, got {}",
            request.k
        )));
    }

    let candidates = state.matcher.rank(&request.item_type, request.k).await?;
    Ok(Json(CandidatesResponse { candidates }).into_response())
}
