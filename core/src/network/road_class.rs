use serde::{Deserialize, Serialize};

/// OSM highway classes the survey cares about.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoadClass {
    Residential,
    Primary,
    Secondary,
    Tertiary,
    Unclassified,
}

impl RoadClass {
    /// Maps a raw `highway` tag to a class. Tags outside the survey set
    /// (footways, motorway links, ...) yield `None` and the way is filtered
    /// out rather than treated as an error.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "residential" => Some(Self::Residential),
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            "tertiary" => Some(Self::Tertiary),
            "unclassified" => Some(Self::Unclassified),
            _ => None,
        }
    }

    /// Default set surveyed when the caller does not narrow the classes.
    pub fn default_survey_set() -> [Self; 4] {
        [
            Self::Residential,
            Self::Primary,
            Self::Secondary,
            Self::Tertiary,
        ]
    }
}
