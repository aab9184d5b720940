use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, header},
};
use chrono::Utc;
use hostwatch_common::{
    params::CreateHostParams,
    views::{ApiErrorResponse, Host},
};
use hostwatch_db::storage::HostStore;
use tracing::{debug, info, instrument};

use crate::{context::ApiContext, error::ApiError};

mod sweep;
use sweep::{Sweep, sweep};


const JSON_CONTENT_TYPE: &str = "application/json";

/// POST /api/hosts
///
/// Register a host. The body is stored as-is, apart from the keys the store
/// manages itself.
///
/// Responds 400 `Body must be JSON.` when the `content-type` does not start
/// with `application/json`. The same 400 is returned when the content type
/// passes but the body is invalid JSON or not a JSON object; the store is not
/// touched in either case.
#[utoipa::path(
    post,
    path = "/api/hosts",
    tags = ["hosts"],
    request_body(content = CreateHostParams, content_type = "application/json"),
    responses(
        (status = 200, description = "Host created", body = Host),
        (status = 400, description = "Body is not a JSON object", body = ApiErrorResponse),
    )
)]
#[instrument(skip_all)]
pub async fn create_host(
    State(ctx): State<ApiContext>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Host>, ApiError> {
    if !is_json(&headers) {
        return Err(ApiError::BodyNotJson);
    }

    let params: CreateHostParams =
        serde_json::from_slice(&body).map_err(|_| ApiError::BodyNotJson)?;

    let host = HostStore::create(&*ctx.db, params)
        .await
        .map_err(ApiError::CreateHost)?;

    info!(host_id = %host.id, "Host created");

    Ok(Json(host.into()))
}

/// GET /api/hosts
///
/// List every host that has been written to within the staleness window.
/// Stale hosts found along the way are deleted in the background; a failed
/// delete does not affect the response.
/// Hosts with no readable `updatedAt` are always listed.
#[utoipa::path(
    get,
    path = "/api/hosts",
    tags = ["hosts"],
    responses((status = 200, description = "Hosts that are not stale", body = Vec<Host>))
)]
#[instrument(skip_all)]
pub async fn list_hosts(State(ctx): State<ApiContext>) -> Result<Json<Vec<Host>>, ApiError> {
    let hosts = HostStore::list(&*ctx.db)
        .await
        .map_err(ApiError::FetchHosts)?;

    let Sweep { kept, expired } = sweep(hosts, Utc::now(), ctx.config.stale_after());

    if !expired.is_empty() {
        debug!(count = expired.len(), "Removing stale hosts");
    }

    for id in expired {
        let db = Arc::clone(&ctx.db);
        tokio::spawn(async move {
            if let Err(e) = HostStore::delete(&*db, id).await {
                debug!(host_id = %id, error = %e, "Failed to remove stale host");
            }
        });
    }

    Ok(Json(kept.into_iter().map(Into::into).collect()))
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with(JSON_CONTENT_TYPE))
}
