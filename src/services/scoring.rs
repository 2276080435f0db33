use std::cmp::Ordering;
use std::collections::HashSet;

use crate::{
    models::{Movie, PreferenceProfile, ScoreBreakdown},
    services::features::{FeatureSet, FeatureVector},
};

/// Relative weights of the three taste signals inside the preference
/// component. They sum to 1 so the component stays in [0, 1].
pub const GENRE_WEIGHT: f64 = 0.5;
pub const ACTOR_WEIGHT: f64 = 0.3;
pub const DIRECTOR_WEIGHT: f64 = 0.2;

/// Scores candidate movies against one preference profile
///
/// The combined score is `w * preference + (1 - w) * quality`, where `w` is
/// the profile's (clamped) preference weight, `preference` folds genre
/// overlap and actor/director hits together with the fixed weights above,
/// and `quality` is the normalized IMDB rating. Both components live in
/// [0, 1], so the combined score does too.
pub struct Scorer {
    profile_vector: Vec<f64>,
    profile_genre_count: usize,
    actors: HashSet<String>,
    directors: HashSet<String>,
    weight: f64,
}

impl Scorer {
    pub fn new(profile: &PreferenceProfile, features: &FeatureSet) -> Self {
        // De-duplicate stated genres so the overlap denominator counts
        // distinct preferences
        let mut unique_genres: Vec<String> = Vec::new();
        for genre in &profile.genres {
            if !unique_genres.contains(genre) {
                unique_genres.push(genre.clone());
            }
        }

        Self {
            profile_vector: features.profile_vector(&unique_genres),
            profile_genre_count: unique_genres.len(),
            actors: profile.actors.iter().map(|a| a.to_lowercase()).collect(),
            directors: profile.directors.iter().map(|d| d.to_lowercase()).collect(),
            weight: profile.clamped_weight(),
        }
    }

    /// The clamped taste weight this scorer applies
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn score(&self, movie: &Movie, vector: &FeatureVector) -> (f64, ScoreBreakdown) {
        // Dot product against the profile indicator vector counts shared
        // genres; an empty genre preference contributes no signal
        let genre_overlap = if self.profile_genre_count == 0 {
            0.0
        } else {
            let shared: f64 = self
                .profile_vector
                .iter()
                .zip(&vector.genres)
                .map(|(p, m)| p * m)
                .sum();
            shared / self.profile_genre_count as f64
        };

        let actor_match = movie
            .cast
            .iter()
            .any(|actor| self.actors.contains(&actor.to_lowercase()));
        let director_match = self.directors.contains(&movie.director.to_lowercase());

        let preference = GENRE_WEIGHT * genre_overlap
            + ACTOR_WEIGHT * f64::from(u8::from(actor_match))
            + DIRECTOR_WEIGHT * f64::from(u8::from(director_match));
        let quality = vector.rating;
        let combined = self.weight * preference + (1.0 - self.weight) * quality;

        (
            combined,
            ScoreBreakdown {
                preference,
                quality,
                genre_overlap,
                actor_match,
                director_match,
            },
        )
    }
}

/// Sort key for ranked results
///
/// Descending combined score, then raw rating, then vote count, then
/// catalog insertion order. `total_cmp` keeps the ordering total and
/// deterministic.
#[derive(Debug, Clone, Copy)]
pub struct RankKey {
    pub score: f64,
    pub rating: f64,
    pub votes: u64,
    pub position: usize,
}

pub fn rank_order(a: &RankKey, b: &RankKey) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then(b.rating.total_cmp(&a.rating))
        .then(b.votes.cmp(&a.votes))
        .then(a.position.cmp(&b.position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, RawMovieRecord};

    fn record(title: &str, genre: &str, rating: f64, votes: u64) -> RawMovieRecord {
        RawMovieRecord {
            title: title.to_string(),
            year: 2000,
            genre: genre.to_string(),
            director: "Frank Darabont".to_string(),
            actors: "Tim Robbins, Morgan Freeman".to_string(),
            imdb_rating: rating,
            imdb_votes: votes,
            description: String::new(),
        }
    }

    fn profile(genres: &[&str], actors: &[&str], directors: &[&str], weight: f64) -> PreferenceProfile {
        PreferenceProfile {
            genres: genres.iter().map(|s| s.to_string()).collect(),
            actors: actors.iter().map(|s| s.to_string()).collect(),
            directors: directors.iter().map(|s| s.to_string()).collect(),
            preference_weight: weight,
        }
    }

    fn score_at(catalog: &Catalog, features: &FeatureSet, scorer: &Scorer, position: usize) -> (f64, ScoreBreakdown) {
        scorer.score(&catalog.movies()[position], features.vector(position).unwrap())
    }

    #[test]
    fn test_worked_two_movie_example() {
        // A: Drama 9.0; B: Drama+Crime 8.5; profile {Drama}, weight 0.5
        let catalog = Catalog::from_records(vec![
            record("A", "Drama", 9.0, 1000),
            record("B", "Drama, Crime", 8.5, 2000),
        ]);
        let features = FeatureSet::build(&catalog);
        let scorer = Scorer::new(&profile(&["Drama"], &[], &[], 0.5), &features);

        let (score_a, breakdown_a) = score_at(&catalog, &features, &scorer, 0);
        let (score_b, breakdown_b) = score_at(&catalog, &features, &scorer, 1);

        assert!((breakdown_a.genre_overlap - 1.0).abs() < 1e-12);
        assert!((breakdown_b.genre_overlap - 1.0).abs() < 1e-12);
        assert!((breakdown_a.preference - 0.5).abs() < 1e-12);
        assert!((breakdown_b.preference - 0.5).abs() < 1e-12);
        assert!((score_a - 0.70).abs() < 1e-12);
        assert!((score_b - 0.675).abs() < 1e-12);
        assert!(score_a > score_b);
    }

    #[test]
    fn test_empty_genre_preference_gives_zero_overlap() {
        let catalog = Catalog::from_records(vec![record("A", "Drama", 9.0, 1000)]);
        let features = FeatureSet::build(&catalog);
        let scorer = Scorer::new(&profile(&[], &["Tim Robbins"], &[], 1.0), &features);
        let (score, breakdown) = score_at(&catalog, &features, &scorer, 0);
        assert_eq!(breakdown.genre_overlap, 0.0);
        assert!(breakdown.actor_match);
        assert!((score - ACTOR_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_partial_genre_overlap_fraction() {
        let catalog = Catalog::from_records(vec![record("A", "Drama, Crime", 8.0, 100)]);
        let features = FeatureSet::build(&catalog);
        // Two of three preferred genres hit
        let scorer = Scorer::new(&profile(&["Drama", "Crime", "Western"], &[], &[], 1.0), &features);
        let (_, breakdown) = score_at(&catalog, &features, &scorer, 0);
        assert!((breakdown.genre_overlap - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_profile_genres_count_once() {
        let catalog = Catalog::from_records(vec![record("A", "Drama", 8.0, 100)]);
        let features = FeatureSet::build(&catalog);
        let scorer = Scorer::new(
            &profile(&["Drama", "Drama"], &[], &[], 1.0),
            &features,
        );
        let (_, breakdown) = score_at(&catalog, &features, &scorer, 0);
        assert!((breakdown.genre_overlap - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_people_matching_is_case_insensitive() {
        let catalog = Catalog::from_records(vec![record("A", "Drama", 8.0, 100)]);
        let features = FeatureSet::build(&catalog);
        let scorer = Scorer::new(
            &profile(&[], &["MORGAN FREEMAN"], &["frank darabont"], 1.0),
            &features,
        );
        let (score, breakdown) = score_at(&catalog, &features, &scorer, 0);
        assert!(breakdown.actor_match);
        assert!(breakdown.director_match);
        assert!((score - (ACTOR_WEIGHT + DIRECTOR_WEIGHT)).abs() < 1e-12);
    }

    #[test]
    fn test_weight_extremes() {
        let catalog = Catalog::from_records(vec![record("A", "Drama", 8.0, 100)]);
        let features = FeatureSet::build(&catalog);

        // weight 1: pure preference
        let scorer = Scorer::new(&profile(&["Drama"], &[], &[], 1.0), &features);
        let (score, _) = score_at(&catalog, &features, &scorer, 0);
        assert!((score - GENRE_WEIGHT).abs() < 1e-12);

        // weight 0: pure quality
        let scorer = Scorer::new(&profile(&["Drama"], &[], &[], 0.0), &features);
        let (score, _) = score_at(&catalog, &features, &scorer, 0);
        assert!((score - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_out_of_range_weight_is_clamped() {
        let catalog = Catalog::from_records(vec![record("A", "Drama", 8.0, 100)]);
        let features = FeatureSet::build(&catalog);
        let scorer = Scorer::new(&profile(&["Drama"], &[], &[], 3.0), &features);
        assert_eq!(scorer.weight(), 1.0);
        let (score, _) = score_at(&catalog, &features, &scorer, 0);
        assert!((score - GENRE_WEIGHT).abs() < 1e-12);
    }

    #[test]
    fn test_score_stays_in_unit_interval() {
        let catalog = Catalog::from_records(vec![record("A", "Drama", 10.0, 100)]);
        let features = FeatureSet::build(&catalog);
        let scorer = Scorer::new(
            &profile(&["Drama"], &["Tim Robbins"], &["Frank Darabont"], 0.5),
            &features,
        );
        let (score, breakdown) = score_at(&catalog, &features, &scorer, 0);
        assert!((breakdown.preference - 1.0).abs() < 1e-12);
        assert!((breakdown.quality - 1.0).abs() < 1e-12);
        assert!((score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_rank_order_tie_breaks() {
        let a = RankKey { score: 0.8, rating: 9.0, votes: 100, position: 3 };
        let b = RankKey { score: 0.8, rating: 8.5, votes: 900, position: 1 };
        // Equal score: higher rating wins regardless of votes
        assert_eq!(rank_order(&a, &b), Ordering::Less);

        let c = RankKey { score: 0.8, rating: 9.0, votes: 500, position: 5 };
        // Equal score and rating: higher votes win
        assert_eq!(rank_order(&c, &a), Ordering::Less);

        let d = RankKey { score: 0.8, rating: 9.0, votes: 500, position: 2 };
        // Full tie: earlier catalog position wins
        assert_eq!(rank_order(&d, &c), Ordering::Less);
    }
}
