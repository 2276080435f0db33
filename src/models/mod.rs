use std::fmt::Display;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod preferences;
mod results;

pub use preferences::PreferenceProfile;
pub use results::{GenreRating, ScoreBreakdown, ScoredResult, TasteAnalysis};

/// Identifier for a catalog movie
///
/// Generated when the catalog is loaded and stable for the lifetime of the
/// session (refreshes keep the id of entries they replace).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MovieId(pub Uuid);

impl MovieId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MovieId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A catalog entry after cleaning
///
/// Immutable once loaded; the recommendation engine only ever reads it.
/// Genre, cast, and director fields are already trimmed and de-noised by the
/// catalog loader. The rating is on the IMDB 0-10 scale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub genres: Vec<String>,
    pub director: String,
    pub cast: Vec<String>,
    pub rating: f64,
    pub votes: u64,
    pub synopsis: String,
}

impl Movie {
    /// Whether the movie carries the given genre (exact match on the cleaned
    /// genre label)
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }
}
