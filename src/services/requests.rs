use crate::models::{AidRequest, HelpType, RequestStatus, Urgency};
use crate::services::StoreError;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;

/// Equality constraints pushed down to the request store
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestQuery {
    pub status: Option<RequestStatus>,
    pub help_type: Option<HelpType>,
    pub urgency: Option<Urgency>,
    pub victim_id: Option<String>,
}

impl RequestQuery {
    pub fn pending() -> Self {
        Self {
            status: Some(RequestStatus::Pending),
            ..Default::default()
        }
    }

    fn matches(&self, request: &AidRequest) -> bool {
        self.status.map_or(true, |s| request.status == s)
            && self.help_type.map_or(true, |t| request.help_type == t)
            && self.urgency.map_or(true, |u| request.urgency == u)
            && self
                .victim_id
                .as_deref()
                .map_or(true, |v| request.victim_id == v)
    }
}

/// Volunteer taking on a request
#[derive(Debug, Clone, PartialEq)]
pub struct VolunteerAssignment {
    pub volunteer_id: String,
    pub volunteer_name: String,
    pub distance_km: Option<f64>,
}

/// Read/write access to aid request records
pub trait RequestStore: Send + Sync {
    /// Requests matching `query`, newest first
    fn query(&self, query: &RequestQuery) -> Result<Vec<AidRequest>, StoreError>;

    fn get(&self, id: &str) -> Result<AidRequest, StoreError>;

    fn insert(&self, request: AidRequest) -> Result<(), StoreError>;

    /// Claim a pending request for a volunteer; it moves to in-progress
    fn assign_volunteer(
        &self,
        id: &str,
        assignment: VolunteerAssignment,
        now: DateTime<Utc>,
    ) -> Result<AidRequest, StoreError>;

    /// Change the status of a request on behalf of `actor_id`
    fn update_status(
        &self,
        id: &str,
        status: RequestStatus,
        actor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AidRequest, StoreError>;
}

/// Request store held in process memory
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    requests: RwLock<HashMap<String, AidRequest>>,
}

impl InMemoryRequestStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_requests<I: IntoIterator<Item = AidRequest>>(requests: I) -> Self {
        let requests = requests
            .into_iter()
            .map(|request| (request.id.clone(), request))
            .collect();
        Self {
            requests: RwLock::new(requests),
        }
    }

    pub fn len(&self) -> usize {
        self.requests.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.read().is_empty()
    }
}

impl RequestStore for InMemoryRequestStore {
    fn query(&self, query: &RequestQuery) -> Result<Vec<AidRequest>, StoreError> {
        let mut found: Vec<AidRequest> = self
            .requests
            .read()
            .values()
            .filter(|request| query.matches(request))
            .cloned()
            .collect();

        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(found)
    }

    fn get(&self, id: &str) -> Result<AidRequest, StoreError> {
        self.requests
            .read()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("request {}", id)))
    }

    fn insert(&self, request: AidRequest) -> Result<(), StoreError> {
        self.requests.write().insert(request.id.clone(), request);
        Ok(())
    }

    fn assign_volunteer(
        &self,
        id: &str,
        assignment: VolunteerAssignment,
        now: DateTime<Utc>,
    ) -> Result<AidRequest, StoreError> {
        let mut requests = self.requests.write();
        let request = requests
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("request {}", id)))?;

        if request.status != RequestStatus::Pending {
            return Err(StoreError::NotAvailable(id.to_string()));
        }

        request.status = RequestStatus::InProgress;
        request.volunteer_id = Some(assignment.volunteer_id);
        request.volunteer_name = Some(assignment.volunteer_name);
        request.volunteer_distance_km = assignment.distance_km;
        request.updated_at = Some(now);

        tracing::debug!("Request {} assigned to {:?}", id, request.volunteer_id);
        Ok(request.clone())
    }

    fn update_status(
        &self,
        id: &str,
        status: RequestStatus,
        actor_id: &str,
        now: DateTime<Utc>,
    ) -> Result<AidRequest, StoreError> {
        let mut requests = self.requests.write();
        let request = requests
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(format!("request {}", id)))?;

        let is_victim = request.victim_id == actor_id;
        let is_volunteer = request.volunteer_id.as_deref() == Some(actor_id);

        if !(is_victim || is_volunteer) {
            return Err(StoreError::Forbidden(format!(
                "{} is not a party to request {}",
                actor_id, id
            )));
        }

        if request.status == RequestStatus::Fulfilled {
            return Err(StoreError::InvalidTransition(
                "fulfilled requests cannot change status".to_string(),
            ));
        }

        if status == RequestStatus::Fulfilled && !is_victim {
            return Err(StoreError::Forbidden(
                "only the requester can mark a request fulfilled".to_string(),
            ));
        }

        request.status = status;
        request.updated_at = Some(now);

        match status {
            RequestStatus::Fulfilled => request.fulfilled_at = Some(now),
            RequestStatus::Pending => {
                request.volunteer_id = None;
                request.volunteer_name = None;
                request.volunteer_distance_km = None;
            }
            RequestStatus::InProgress | RequestStatus::Cancelled => {}
        }

        tracing::debug!("Request {} moved to {:?} by {}", id, status, actor_id);
        Ok(request.clone())
    }
}
