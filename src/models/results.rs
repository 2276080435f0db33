use serde::{Deserialize, Serialize};

use super::Movie;

/// Component scores behind a final ranked score
///
/// `preference` and `quality` are the two named components of the combined
/// score; the remaining fields record which individual taste signals fired
/// so the explanation generator can order them by contribution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    /// Taste-match component in [0, 1]
    pub preference: f64,
    /// Normalized rating component in [0, 1]
    pub quality: f64,
    /// Fraction of the profile's genres the movie carries
    pub genre_overlap: f64,
    pub actor_match: bool,
    pub director_match: bool,
}

/// One ranked movie returned by a query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredResult {
    pub movie: Movie,
    /// Combined score in [0, 1]
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    pub explanation: String,
}

/// Average catalog rating for one of the user's preferred genres
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenreRating {
    pub genre: String,
    pub average_rating: f64,
    pub movie_count: usize,
}

/// Aggregate taste statistics for a preference profile
///
/// Purely presentational: summarizes how the profile lines up against the
/// current catalog snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TasteAnalysis {
    pub preferred_genres: Vec<String>,
    pub catalog_size: usize,
    /// Average rating per preferred genre, highest first
    pub genre_ratings: Vec<GenreRating>,
    /// Preferred genre carried by the most matched movies, if any matched
    pub most_matched_genre: Option<String>,
    /// Number of movies with a non-zero taste match
    pub matched_movies: usize,
    /// Average rating of the recommended (top-ranked) set
    pub average_recommended_rating: f64,
    /// Catalog genres outside the profile, suggestions for exploring
    pub unexplored_genres: Vec<String>,
}
