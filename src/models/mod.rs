// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Account, AidRequest, Coordinate, HelpType, ListingFilters, Location, MatchResult,
    RequestStatus, Role, Urgency, Viewer,
};
pub use requests::{
    CreateRequestBody, ListRequestsQuery, MapQuery, UpdateProfileRequest, UpdateStatusRequest,
    ViewerQuery,
};
pub use responses::{
    CreatedResponse, ErrorResponse, HealthResponse, MapEntry, MapResponse, MatchResponse,
    MessageResponse,
};
