//! Incident handlers: submission, the public listing and the caller's own
//! reports.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::domain::{Error, IncidentDraft, IncidentFilter, NewIncidentRecord};

use super::error::{ApiResult, map_persistence};
use super::session::SessionContext;
use super::state::HttpState;

/// Incident submission body. Coordinates arrive as raw JSON values so that
/// only genuine numbers count as client-supplied; any other shape falls back
/// to location-based geocoding.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentRequest {
    #[serde(default)]
    pub title: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub photos: Option<Value>,
}

/// Accept a coordinate only when it is a JSON number.
fn coerce_coordinate(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        _ => None,
    }
}

impl CreateIncidentRequest {
    fn into_draft(self) -> IncidentDraft {
        let latitude = coerce_coordinate(self.latitude.as_ref());
        let longitude = coerce_coordinate(self.longitude.as_ref());
        IncidentDraft {
            title: self.title,
            category: self.category,
            location: self.location,
            description: self.description,
            latitude,
            longitude,
            status: self.status,
            priority: self.priority,
            photos: self.photos,
        }
    }
}

/// Query parameters of the public listing; every present filter must match.
#[derive(Debug, Default, Deserialize)]
pub struct IncidentListQuery {
    #[serde(rename = "type")]
    pub incident_type: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub location: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

impl From<IncidentListQuery> for IncidentFilter {
    fn from(query: IncidentListQuery) -> Self {
        Self {
            category: non_blank(query.incident_type),
            status: non_blank(query.status),
            priority: non_blank(query.priority),
            location: non_blank(query.location),
        }
    }
}

/// Submit a new incident report. Requires a session; ownership always comes
/// from the verified claims, never from the payload.
#[post("/incidents")]
pub async fn create_incident(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateIncidentRequest>,
) -> ApiResult<HttpResponse> {
    let claims = session.require()?;
    let record = NewIncidentRecord::from_draft(claims.uid, payload.into_inner().into_draft())
        .map_err(|err| Error::invalid_request(err.to_string()))?;

    let incident = state
        .incidents
        .create(record)
        .await
        .map_err(|err| map_persistence("error creating incident", err))?;
    info!(incident_id = incident.id, owner = claims.uid, "incident created");
    Ok(HttpResponse::Created().json(json!({ "incident": incident })))
}

/// Public listing, newest first, optionally narrowed by query filters.
#[get("/incidents")]
pub async fn list_incidents(
    state: web::Data<HttpState>,
    query: web::Query<IncidentListQuery>,
) -> ApiResult<HttpResponse> {
    let incidents = state
        .incidents
        .list(query.into_inner().into())
        .await
        .map_err(|err| map_persistence("error listing incidents", err))?;
    Ok(HttpResponse::Ok().json(incidents))
}

/// The caller's own reports, newest first.
#[get("/incidents/mine")]
pub async fn my_incidents(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let claims = session.require()?;
    let incidents = state
        .incidents
        .list_by_owner(claims.uid)
        .await
        .map_err(|err| map_persistence("error listing incidents", err))?;
    Ok(HttpResponse::Ok().json(incidents))
}
