use crate::models::domain::{HelpType, Location, RequestStatus, Urgency};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query identifying the viewer
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ViewerQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Query for the request listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ListRequestsQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default)]
    pub status: Option<RequestStatus>,
    #[serde(default, rename = "type")]
    pub help_type: Option<HelpType>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[validate(range(min = 0.0))]
    #[serde(default, alias = "max_distance", rename = "maxDistance")]
    pub max_distance: Option<f64>,
}

/// Query for the map view; status is always pending
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MapQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[serde(default, rename = "type")]
    pub help_type: Option<HelpType>,
    #[serde(default)]
    pub urgency: Option<Urgency>,
    #[validate(range(min = 0.0))]
    #[serde(default, alias = "max_distance", rename = "maxDistance")]
    pub max_distance: Option<f64>,
}

/// Body of a status change
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: RequestStatus,
}

/// Body of a new aid request
///
/// The location falls back to the requester's own when omitted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRequestBody {
    #[serde(rename = "type")]
    pub help_type: HelpType,
    pub urgency: Urgency,
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    #[serde(default)]
    pub location: Option<Location>,
}

/// Body of a profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub skills: Option<Vec<HelpType>>,
}
