use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Clock, LocationRequirement, MatchError, Matcher};
use crate::models::{
    Account, AidRequest, CreateRequestBody, CreatedResponse, ErrorResponse, HealthResponse,
    ListRequestsQuery, ListingFilters, MapEntry, MapQuery, MapResponse, MatchResponse,
    MessageResponse, RequestStatus, Role, UpdateProfileRequest, UpdateStatusRequest, ViewerQuery,
};
use crate::models::responses::round_km;
use crate::services::{AccountStore, RequestQuery, RequestStore, StoreError, VolunteerAssignment};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountStore>,
    pub requests: Arc<dyn RequestStore>,
    pub matcher: Matcher,
    pub clock: Arc<dyn Clock>,
    pub map_description_chars: usize,
}

/// Configure all request and matching routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/profile", web::put().to(update_profile))
        .route("/requests", web::get().to(list_requests))
        .route("/requests", web::post().to(create_request))
        .route("/requests/{id}/volunteer", web::put().to(volunteer_for_request))
        .route("/requests/{id}/status", web::put().to(update_request_status))
        .route("/map", web::get().to(map_data))
        .route("/suggestions", web::get().to(suggestions));
}

fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

fn store_error_response(error: &str, e: &StoreError) -> HttpResponse {
    let status = match e {
        StoreError::NotFound(_) => StatusCode::NOT_FOUND,
        StoreError::NotAvailable(_) => StatusCode::CONFLICT,
        StoreError::Forbidden(_) => StatusCode::FORBIDDEN,
        StoreError::InvalidTransition(_) => StatusCode::BAD_REQUEST,
        StoreError::Io(_) | StoreError::Parse(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, error, e)
}

/// Fetch the account the query acts for
fn load_viewer(state: &AppState, user_id: &str) -> Result<Account, HttpResponse> {
    state.accounts.get(user_id).map_err(|e| {
        tracing::warn!("Failed to fetch account {}: {}", user_id, e);
        store_error_response("User not found", &e)
    })
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Update the caller's name, location or skills
///
/// PUT /api/v1/profile?userId=
async fn update_profile(
    state: web::Data<AppState>,
    query: web::Query<ViewerQuery>,
    body: web::Json<UpdateProfileRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }
    if let Err(errors) = body.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let mut account = match load_viewer(&state, &query.user_id) {
        Ok(account) => account,
        Err(response) => return response,
    };

    let update = body.into_inner();
    if let Some(skills) = &update.skills {
        if skills.iter().any(|skill| !skill.is_recognized()) {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid skills",
                "skills must be known help types",
            );
        }
    }

    if let Some(name) = update.name {
        account.name = name;
    }
    if let Some(location) = update.location {
        account.location = location;
    }
    if let Some(skills) = update.skills {
        account.skills = skills;
    }

    let account_id = account.id.clone();
    match state.accounts.upsert(account) {
        Ok(()) => {
            tracing::info!("Profile updated for user {}", account_id);
            HttpResponse::Ok().json(MessageResponse {
                message: "Profile updated successfully".to_string(),
            })
        }
        Err(e) => {
            tracing::error!("Failed to update profile {}: {}", account_id, e);
            store_error_response("Failed to update profile", &e)
        }
    }
}

/// Victim files a new aid request
///
/// POST /api/v1/requests?userId=
///
/// Request body:
/// ```json
/// { "type": "water", "urgency": "high", "description": "...", "location": { ... } }
/// ```
async fn create_request(
    state: web::Data<AppState>,
    query: web::Query<ViewerQuery>,
    body: web::Json<CreateRequestBody>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }
    if let Err(errors) = body.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let account = match load_viewer(&state, &query.user_id) {
        Ok(account) => account,
        Err(response) => return response,
    };

    if account.role != Role::Victim {
        return error_response(
            StatusCode::FORBIDDEN,
            "Forbidden",
            "only victims can create help requests",
        );
    }

    let body = body.into_inner();
    if !body.help_type.is_recognized() || !body.urgency.is_recognized() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid request",
            "type and urgency must be known values",
        );
    }

    let location = body.location.unwrap_or(account.location);
    if location.known().is_none() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Location required",
            "a valid location is required for a help request",
        );
    }

    let now = state.clock.now();
    let request = AidRequest {
        id: uuid::Uuid::new_v4().to_string(),
        victim_id: account.id.clone(),
        victim_name: account.name.clone(),
        help_type: body.help_type,
        urgency: body.urgency,
        description: body.description,
        location,
        status: RequestStatus::Pending,
        volunteer_id: None,
        volunteer_name: None,
        volunteer_distance_km: None,
        created_at: now,
        updated_at: Some(now),
        fulfilled_at: None,
    };
    let request_id = request.id.clone();

    match state.requests.insert(request) {
        Ok(()) => {
            tracing::info!("User {} created request {}", account.id, request_id);
            HttpResponse::Created().json(CreatedResponse {
                message: "Help request created successfully".to_string(),
                request_id,
            })
        }
        Err(e) => {
            tracing::error!("Failed to store request for {}: {}", account.id, e);
            store_error_response("Failed to create request", &e)
        }
    }
}

/// Browse requests nearest first
///
/// GET /api/v1/requests?userId=&status=&type=&urgency=&maxDistance=
///
/// Victims see only their own requests. Volunteers see pending requests
/// unless a status is given.
async fn list_requests(
    state: web::Data<AppState>,
    query: web::Query<ListRequestsQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }
    if query.help_type.is_some_and(|t| !t.is_recognized())
        || query.urgency.is_some_and(|u| !u.is_recognized())
    {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid filter",
            "type and urgency must be known values",
        );
    }

    let account = match load_viewer(&state, &query.user_id) {
        Ok(account) => account,
        Err(response) => return response,
    };

    let status = match account.role {
        Role::Victim => None,
        Role::Volunteer => Some(query.status.unwrap_or(RequestStatus::Pending)),
    };

    let store_query = RequestQuery {
        status,
        help_type: query.help_type,
        urgency: query.urgency,
        victim_id: (account.role == Role::Victim).then(|| account.id.clone()),
    };

    let candidates = match state.requests.query(&store_query) {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query requests for {}: {}", account.id, e);
            return store_error_response("Failed to query requests", &e);
        }
    };

    let filters = ListingFilters {
        status,
        help_type: query.help_type,
        urgency: query.urgency,
        max_distance_km: query.max_distance,
    };

    let results = state
        .matcher
        .list_by_proximity(&account.viewer(), candidates, &filters);

    tracing::info!("Returning {} requests for user {}", results.len(), account.id);

    let body: Vec<MatchResponse> = results.into_iter().map(MatchResponse::from).collect();
    HttpResponse::Ok().json(body)
}

/// Pending requests with a known location, for the map view
///
/// GET /api/v1/map?userId=&type=&urgency=&maxDistance=
async fn map_data(state: web::Data<AppState>, query: web::Query<MapQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }
    if query.help_type.is_some_and(|t| !t.is_recognized())
        || query.urgency.is_some_and(|u| !u.is_recognized())
    {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid filter",
            "type and urgency must be known values",
        );
    }

    let account = match load_viewer(&state, &query.user_id) {
        Ok(account) => account,
        Err(response) => return response,
    };

    let store_query = RequestQuery {
        help_type: query.help_type,
        urgency: query.urgency,
        ..RequestQuery::pending()
    };

    let candidates = match state.requests.query(&store_query) {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query map data for {}: {}", account.id, e);
            return store_error_response("Failed to query requests", &e);
        }
    };

    // A request without a location cannot be pinned
    let candidates = candidates
        .into_iter()
        .filter(|request| request.location.known().is_some())
        .collect();

    let filters = ListingFilters {
        status: Some(RequestStatus::Pending),
        help_type: query.help_type,
        urgency: query.urgency,
        max_distance_km: query.max_distance,
    };

    let requests = state
        .matcher
        .list_by_proximity(&account.viewer(), candidates, &filters)
        .into_iter()
        .map(|result| MapEntry::from_result(result, state.map_description_chars))
        .collect();

    HttpResponse::Ok().json(MapResponse {
        requests,
        user_location: account.location,
    })
}

/// Ranked suggestions for a volunteer
///
/// GET /api/v1/suggestions?userId=
async fn suggestions(state: web::Data<AppState>, query: web::Query<ViewerQuery>) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let account = match load_viewer(&state, &query.user_id) {
        Ok(account) => account,
        Err(response) => return response,
    };

    let candidates = match state.requests.query(&RequestQuery::pending()) {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::error!("Failed to query pending requests: {}", e);
            return store_error_response("Failed to query requests", &e);
        }
    };

    match state
        .matcher
        .suggest(&account.viewer(), candidates, state.clock.as_ref())
    {
        Ok(results) => {
            tracing::info!("Returning {} suggestions for user {}", results.len(), account.id);
            let body: Vec<MatchResponse> = results.into_iter().map(MatchResponse::from).collect();
            HttpResponse::Ok().json(body)
        }
        Err(MatchError::LocationRequired(requirement)) => {
            let status = match requirement {
                LocationRequirement::NotVolunteer => StatusCode::FORBIDDEN,
                LocationRequirement::MissingLocation => StatusCode::BAD_REQUEST,
            };
            error_response(status, "Location required", requirement)
        }
    }
}

/// Volunteer takes on a pending request
///
/// PUT /api/v1/requests/{id}/volunteer?userId=
async fn volunteer_for_request(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ViewerQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let request_id = path.into_inner();
    let account = match load_viewer(&state, &query.user_id) {
        Ok(account) => account,
        Err(response) => return response,
    };

    if account.role != Role::Volunteer {
        return error_response(
            StatusCode::FORBIDDEN,
            "Forbidden",
            "only volunteers can offer help",
        );
    }

    let request = match state.requests.get(&request_id) {
        Ok(request) => request,
        Err(e) => return store_error_response("Request not found", &e),
    };

    let assignment = VolunteerAssignment {
        volunteer_id: account.id.clone(),
        volunteer_name: account.name.clone(),
        distance_km: state
            .matcher
            .distance_between(&account.viewer(), &request)
            .map(round_km),
    };

    match state
        .requests
        .assign_volunteer(&request_id, assignment, state.clock.now())
    {
        Ok(_) => {
            tracing::info!("User {} volunteered for request {}", account.id, request_id);
            HttpResponse::Ok().json(MessageResponse {
                message: "Successfully volunteered for request".to_string(),
            })
        }
        Err(e) => {
            tracing::warn!("Failed to assign {} to {}: {}", account.id, request_id, e);
            store_error_response("Failed to volunteer", &e)
        }
    }
}

/// Move a request to a new status
///
/// PUT /api/v1/requests/{id}/status?userId=
///
/// Request body:
/// ```json
/// { "status": "pending|in_progress|fulfilled|cancelled" }
/// ```
async fn update_request_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<ViewerQuery>,
    body: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let request_id = path.into_inner();
    let account = match load_viewer(&state, &query.user_id) {
        Ok(account) => account,
        Err(response) => return response,
    };

    match state
        .requests
        .update_status(&request_id, body.status, &account.id, state.clock.now())
    {
        Ok(_) => HttpResponse::Ok().json(MessageResponse {
            message: "Request status updated successfully".to_string(),
        }),
        Err(e) => {
            tracing::warn!("Status update on {} by {} rejected: {}", request_id, account.id, e);
            store_error_response("Failed to update status", &e)
        }
    }
}
