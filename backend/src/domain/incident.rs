//! Incident aggregate and the pure rules applied when a citizen files a
//! report: coordinate resolution, priority derivation, photo normalisation
//! and statistics bucketing.
//!
//! Everything here is framework-free so the rules can be unit tested without
//! HTTP or database plumbing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Row cap shared by every incident listing.
pub const LISTING_CAP: i64 = 200;

/// Number of incidents returned in the `recientes` section of the stats.
pub const RECENT_COUNT: i64 = 5;

/// Default status for a freshly submitted report.
pub const DEFAULT_STATUS: &str = "Pendiente";

/// A citizen incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: i32,
    pub title: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub user_id: i32,
    pub created_at: Option<DateTime<Utc>>,
    pub status: String,
    pub priority: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: Vec<String>,
}

/// Geographic coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Citywide fallback used when no known place matches the location text.
pub const DEFAULT_COORDINATES: Coordinates = Coordinates {
    latitude: -0.9536,
    longitude: -80.7286,
};

/// Known place-name substrings and their coordinates. Declaration order is
/// the match order; the first entry contained in the location text wins.
const PLACE_TABLE: &[(&str, Coordinates)] = &[
    (
        "av. 4 de noviembre",
        Coordinates {
            latitude: -0.9536,
            longitude: -80.7286,
        },
    ),
    (
        "malecon",
        Coordinates {
            latitude: -0.9486,
            longitude: -80.7206,
        },
    ),
    (
        "los esteros",
        Coordinates {
            latitude: -0.9456,
            longitude: -80.7156,
        },
    ),
    (
        "mercado central",
        Coordinates {
            latitude: -0.9506,
            longitude: -80.7236,
        },
    ),
    (
        "universidad",
        Coordinates {
            latitude: -0.9426,
            longitude: -80.7126,
        },
    ),
    (
        "centro",
        Coordinates {
            latitude: -0.95,
            longitude: -80.725,
        },
    ),
    (
        "san lorenzo",
        Coordinates {
            latitude: -0.9476,
            longitude: -80.7196,
        },
    ),
    (
        "jocay",
        Coordinates {
            latitude: -0.9446,
            longitude: -80.7146,
        },
    ),
    (
        "circunvalacion",
        Coordinates {
            latitude: -0.9516,
            longitude: -80.7266,
        },
    ),
];

/// Resolve coordinates from a free-form location description.
///
/// Case-insensitive substring match against the fixed place table; falls
/// back to [`DEFAULT_COORDINATES`] when nothing matches.
pub fn resolve_coordinates(location: Option<&str>) -> Coordinates {
    let text = location.unwrap_or_default().to_lowercase();
    PLACE_TABLE
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map_or(DEFAULT_COORDINATES, |(_, coords)| *coords)
}

/// Derive the report priority.
///
/// An explicit priority always wins. Otherwise a category mentioning
/// "seguridad" (any case) is escalated to "Alta"; everything else is "Media".
pub fn derive_priority(explicit: Option<&str>, category: Option<&str>) -> String {
    if let Some(priority) = explicit {
        if !priority.trim().is_empty() {
            return priority.to_owned();
        }
    }
    let is_security = category
        .map(|c| c.to_lowercase().contains("seguridad"))
        .unwrap_or(false);
    if is_security { "Alta" } else { "Media" }.to_owned()
}

/// Normalise the client-supplied photo list to non-empty strings.
///
/// Accepts raw URL/data strings or objects exposing one of the conventional
/// fields (`url`, `dataUrl`, `base64`, `src`); anything else is discarded.
pub fn normalize_photos(raw: Option<&Value>) -> Vec<String> {
    let Some(Value::Array(entries)) = raw else {
        return Vec::new();
    };
    entries
        .iter()
        .filter_map(|entry| match entry {
            Value::String(s) => Some(s.clone()),
            Value::Object(fields) => ["url", "dataUrl", "base64", "src"]
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_str))
                .map(str::to_owned),
            _ => None,
        })
        .filter(|s| !s.is_empty())
        .collect()
}

/// Client-supplied incident submission, before validation and defaulting.
#[derive(Debug, Clone, Default)]
pub struct IncidentDraft {
    pub title: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub photos: Option<Value>,
}

/// Validation failures for an incident draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum IncidentValidationError {
    #[error("title is required")]
    EmptyTitle,
}

/// Fully resolved incident ready for insertion; every invariant holds:
/// non-empty title, populated coordinates, derived priority and status.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncidentRecord {
    pub title: String,
    pub category: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub owner_id: i32,
    pub status: String,
    pub priority: String,
    pub latitude: f64,
    pub longitude: f64,
    pub photos: Vec<String>,
}

impl NewIncidentRecord {
    /// Validate a draft and apply the defaulting rules.
    pub fn from_draft(owner_id: i32, draft: IncidentDraft) -> Result<Self, IncidentValidationError> {
        let title = draft.title.trim().to_owned();
        if title.is_empty() {
            return Err(IncidentValidationError::EmptyTitle);
        }

        let coords = match (draft.latitude, draft.longitude) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Coordinates {
                latitude: lat,
                longitude: lng,
            },
            _ => resolve_coordinates(draft.location.as_deref()),
        };

        let priority = derive_priority(draft.priority.as_deref(), draft.category.as_deref());
        let status = draft
            .status
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_STATUS.to_owned());
        let photos = normalize_photos(draft.photos.as_ref());

        Ok(Self {
            title,
            category: draft.category,
            location: draft.location,
            description: draft.description,
            owner_id,
            status,
            priority,
            latitude: coords.latitude,
            longitude: coords.longitude,
            photos,
        })
    }
}

/// Optional conjunctive filters for the public incident listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentFilter {
    pub category: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub location: Option<String>,
}

/// Count of incidents sharing a (lowercased) status value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Aggregate statistics for the public dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentStats {
    pub total: i64,
    pub pendientes: i64,
    pub en_proceso: i64,
    pub resueltas: i64,
    pub recientes: Vec<Incident>,
}

/// Classify per-status counts into the three dashboard buckets.
///
/// Statuses are free-form text, so bucketing is keyword based: `pend` marks a
/// pending report, `proc`/`aten`/`en ` one in progress, and
/// `resu`/`compl`/`final` a resolved one. A status matching none of the
/// keywords contributes only to `total`, which may therefore exceed the sum
/// of the buckets.
pub fn classify_status_counts(
    total: i64,
    counts: &[StatusCount],
    recientes: Vec<Incident>,
) -> IncidentStats {
    let mut pendientes = 0;
    let mut en_proceso = 0;
    let mut resueltas = 0;

    for entry in counts {
        let status = entry.status.to_lowercase();
        if status.contains("pend") {
            pendientes += entry.count;
        } else if status.contains("proc") || status.contains("aten") || status.contains("en ") {
            en_proceso += entry.count;
        } else if status.contains("resu") || status.contains("compl") || status.contains("final") {
            resueltas += entry.count;
        }
    }

    IncidentStats {
        total,
        pendientes,
        en_proceso,
        resueltas,
        recientes,
    }
}
