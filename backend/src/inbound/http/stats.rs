//! Public aggregate statistics handler.

use actix_web::{HttpResponse, get, web};

use crate::domain::{RECENT_COUNT, classify_status_counts};

use super::error::{ApiResult, map_persistence};
use super::state::HttpState;

/// Aggregate dashboard counters plus the most recent reports.
#[get("/stats")]
pub async fn incident_stats(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let total = state
        .incidents
        .count()
        .await
        .map_err(|err| map_persistence("error computing stats", err))?;
    let counts = state
        .incidents
        .status_counts()
        .await
        .map_err(|err| map_persistence("error computing stats", err))?;
    let recientes = state
        .incidents
        .recent(RECENT_COUNT)
        .await
        .map_err(|err| map_persistence("error computing stats", err))?;

    Ok(HttpResponse::Ok().json(classify_status_counts(total, &counts, recientes)))
}
