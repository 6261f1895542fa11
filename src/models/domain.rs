use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A known geographic point in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Both parts finite and inside the valid degree ranges
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Stored location of a user or request; either part may be missing
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Location {
    pub fn at(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    pub fn unknown() -> Self {
        Self::default()
    }

    /// The coordinate, if both parts are present and in range.
    ///
    /// Out-of-range or non-finite values count as unknown.
    pub fn known(&self) -> Option<Coordinate> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => {
                let coordinate = Coordinate::new(lat, lon);
                coordinate.is_valid().then_some(coordinate)
            }
            _ => None,
        }
    }
}

impl From<Coordinate> for Location {
    fn from(c: Coordinate) -> Self {
        Self::at(c.latitude, c.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Victim,
    Volunteer,
}

/// Category of aid requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum HelpType {
    Food,
    Water,
    Shelter,
    Transport,
    Medical,
    Other,
    /// Any value outside the known set
    Unrecognized,
}

impl HelpType {
    pub const ALL: [HelpType; 6] = [
        HelpType::Food,
        HelpType::Water,
        HelpType::Shelter,
        HelpType::Transport,
        HelpType::Medical,
        HelpType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HelpType::Food => "food",
            HelpType::Water => "water",
            HelpType::Shelter => "shelter",
            HelpType::Transport => "transport",
            HelpType::Medical => "medical",
            HelpType::Other => "other",
            HelpType::Unrecognized => "unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        *self != HelpType::Unrecognized
    }
}

impl From<&str> for HelpType {
    fn from(value: &str) -> Self {
        match value {
            "food" => HelpType::Food,
            "water" => HelpType::Water,
            "shelter" => HelpType::Shelter,
            "transport" => HelpType::Transport,
            "medical" => HelpType::Medical,
            "other" => HelpType::Other,
            _ => HelpType::Unrecognized,
        }
    }
}

impl From<String> for HelpType {
    fn from(value: String) -> Self {
        HelpType::from(value.as_str())
    }
}

impl From<HelpType> for &'static str {
    fn from(value: HelpType) -> Self {
        value.as_str()
    }
}

impl fmt::Display for HelpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "&'static str")]
pub enum Urgency {
    Low,
    Medium,
    High,
    Unrecognized,
}

impl Urgency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Medium => "medium",
            Urgency::High => "high",
            Urgency::Unrecognized => "unrecognized",
        }
    }

    pub fn is_recognized(&self) -> bool {
        *self != Urgency::Unrecognized
    }
}

impl From<&str> for Urgency {
    fn from(value: &str) -> Self {
        match value {
            "low" => Urgency::Low,
            "medium" => Urgency::Medium,
            "high" => Urgency::High,
            _ => Urgency::Unrecognized,
        }
    }
}

impl From<String> for Urgency {
    fn from(value: String) -> Self {
        Urgency::from(value.as_str())
    }
}

impl From<Urgency> for &'static str {
    fn from(value: Urgency) -> Self {
        value.as_str()
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    InProgress,
    Fulfilled,
    Cancelled,
}

/// User record as held by the account store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub location: Location,
    #[serde(default)]
    pub skills: Vec<HelpType>,
}

impl Account {
    /// Project the account into the attributes the engine reads
    pub fn viewer(&self) -> Viewer {
        Viewer {
            role: self.role,
            location: self.location.known(),
            skills: self
                .skills
                .iter()
                .copied()
                .filter(HelpType::is_recognized)
                .collect(),
        }
    }
}

/// The user on whose behalf a listing or suggestion runs
#[derive(Debug, Clone, PartialEq)]
pub struct Viewer {
    pub role: Role,
    pub location: Option<Coordinate>,
    pub skills: HashSet<HelpType>,
}

impl Viewer {
    pub fn new(role: Role, location: Option<Coordinate>) -> Self {
        Self {
            role,
            location,
            skills: HashSet::new(),
        }
    }

    pub fn with_skills<I: IntoIterator<Item = HelpType>>(mut self, skills: I) -> Self {
        self.skills.extend(skills);
        self
    }

    /// The viewer's location if it is in range; anything else counts as unknown
    #[inline]
    pub fn origin(&self) -> Option<Coordinate> {
        self.location.filter(Coordinate::is_valid)
    }
}

/// An aid request record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AidRequest {
    pub id: String,
    pub victim_id: String,
    #[serde(default)]
    pub victim_name: String,
    #[serde(rename = "type")]
    pub help_type: HelpType,
    pub urgency: Urgency,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: Location,
    pub status: RequestStatus,
    #[serde(default)]
    pub volunteer_id: Option<String>,
    #[serde(default)]
    pub volunteer_name: Option<String>,
    #[serde(default)]
    pub volunteer_distance_km: Option<f64>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fulfilled_at: Option<DateTime<Utc>>,
}

impl AidRequest {
    /// Both enum fields hold known values
    pub fn is_well_formed(&self) -> bool {
        self.help_type.is_recognized() && self.urgency.is_recognized()
    }
}

/// Equality filters for proximity listing; `None` means unconstrained
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ListingFilters {
    pub status: Option<RequestStatus>,
    pub help_type: Option<HelpType>,
    pub urgency: Option<Urgency>,
    pub max_distance_km: Option<f64>,
}

/// A candidate annotated by the engine
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub request: AidRequest,
    pub distance_km: Option<f64>,
    pub score: Option<u32>,
}
