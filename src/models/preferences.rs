use serde::{Deserialize, Serialize};

/// A user's stated taste for one recommendation request
///
/// Actor and director matching is case-insensitive; genre labels must match
/// the catalog's cleaned genre vocabulary. The profile is not persisted
/// anywhere, it lives for the duration of a single query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferenceProfile {
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub actors: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
    /// Weight on the taste-match component of the final score; the rating
    /// component gets the complement. Clamped to [0, 1] at scoring time.
    #[serde(default = "default_preference_weight")]
    pub preference_weight: f64,
}

fn default_preference_weight() -> f64 {
    0.5
}

impl Default for PreferenceProfile {
    fn default() -> Self {
        Self {
            genres: Vec::new(),
            actors: Vec::new(),
            directors: Vec::new(),
            preference_weight: default_preference_weight(),
        }
    }
}

impl PreferenceProfile {
    /// True when there is nothing to personalize on
    pub fn is_empty(&self) -> bool {
        self.genres.is_empty() && self.actors.is_empty() && self.directors.is_empty()
    }

    /// The taste weight clamped to [0, 1]; out-of-range values come from UI
    /// sliders and are normalized rather than rejected
    pub fn clamped_weight(&self) -> f64 {
        self.preference_weight.clamp(0.0, 1.0)
    }
}
