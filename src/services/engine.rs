use crate::{
    catalog::Catalog,
    error::{AppError, AppResult},
    models::{
        GenreRating, Movie, MovieId, PreferenceProfile, ScoreBreakdown, ScoredResult,
        TasteAnalysis,
    },
    services::{
        explain::explain,
        features::FeatureSet,
        scoring::{rank_order, RankKey, Scorer},
    },
};

/// Taste weight used when ranking by similarity to a source movie: almost
/// all taste match, a sliver of rating to separate equally similar titles
pub const SIMILAR_PREFERENCE_WEIGHT: f64 = 0.9;

/// Result-set size when the caller does not specify one
pub const DEFAULT_TOP_N: usize = 5;

/// The recommendation query engine
///
/// Owns one immutable catalog snapshot and the feature set derived from it.
/// Every query is a synchronous linear scan over the snapshot; the catalog
/// is small enough that no index is warranted. `reload` replaces snapshot
/// and features together, so queries never observe half-updated vectors.
pub struct RecommendationEngine {
    catalog: Catalog,
    features: FeatureSet,
}

impl RecommendationEngine {
    pub fn new(catalog: Catalog) -> Self {
        let features = FeatureSet::build(&catalog);
        if !features.skipped().is_empty() {
            tracing::warn!(
                skipped = features.skipped().len(),
                total = catalog.len(),
                "Some catalog rows were excluded from recommendations"
            );
        }
        Self { catalog, features }
    }

    /// Replaces the catalog snapshot, rebuilding all derived features
    ///
    /// Features for the new snapshot are fully built before anything is
    /// swapped.
    pub fn reload(&mut self, catalog: Catalog) {
        let features = FeatureSet::build(&catalog);
        self.catalog = catalog;
        self.features = features;
        tracing::info!(movies = self.catalog.len(), "Engine reloaded");
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Genres available for selection controls, sorted alphabetically
    pub fn known_genres(&self) -> &[String] {
        self.features.vocabulary()
    }

    /// Personalized recommendations for a preference profile
    pub fn recommendations(
        &self,
        profile: &PreferenceProfile,
        top_n: usize,
    ) -> AppResult<Vec<ScoredResult>> {
        if profile.is_empty() {
            return Err(AppError::EmptyPreference);
        }

        let scorer = Scorer::new(profile, &self.features);
        let ranked = self.ranked(&scorer, None);
        Ok(self.to_results(profile, &scorer, ranked, top_n))
    }

    /// Movies ranked by similarity to the given movie
    ///
    /// The source movie's own genres, cast, and director act as an implicit
    /// preference profile with a taste-heavy weight; the source itself is
    /// never part of the result.
    pub fn similar_movies(&self, id: &MovieId, top_n: usize) -> AppResult<Vec<ScoredResult>> {
        let source = self
            .catalog
            .get(id)
            .ok_or_else(|| AppError::MovieNotFound(id.to_string()))?;
        let source_position = self
            .catalog
            .position(id)
            .ok_or_else(|| AppError::MovieNotFound(id.to_string()))?;

        let profile = PreferenceProfile {
            genres: source.genres.clone(),
            actors: source.cast.clone(),
            directors: vec![source.director.clone()],
            preference_weight: SIMILAR_PREFERENCE_WEIGHT,
        };

        let scorer = Scorer::new(&profile, &self.features);
        let ranked = self.ranked(&scorer, Some(source_position));
        Ok(self.to_results(&profile, &scorer, ranked, top_n))
    }

    /// Top movies carrying a genre, ranked purely by quality
    pub fn genre_top_movies(
        &self,
        genre: &str,
        top_n: usize,
        min_rating: Option<f64>,
    ) -> AppResult<Vec<ScoredResult>> {
        if !self.features.contains_genre(genre) {
            return Err(AppError::UnknownGenre(genre.to_string()));
        }

        // Quality-only ranking: a zero taste weight makes the combined
        // score the normalized rating
        let profile = PreferenceProfile {
            preference_weight: 0.0,
            ..PreferenceProfile::default()
        };
        let scorer = Scorer::new(&profile, &self.features);

        let mut ranked = self.ranked(&scorer, None);
        ranked.retain(|(position, _, _)| {
            let movie = &self.catalog.movies()[*position];
            movie.has_genre(genre) && min_rating.map_or(true, |min| movie.rating >= min)
        });
        Ok(self.to_results(&profile, &scorer, ranked, top_n))
    }

    /// Aggregate taste statistics for a profile against this snapshot
    pub fn taste_analysis(&self, profile: &PreferenceProfile) -> TasteAnalysis {
        let scorer = Scorer::new(profile, &self.features);
        let ranked = self.ranked(&scorer, None);

        let matched: Vec<&Movie> = ranked
            .iter()
            .filter(|(_, _, breakdown)| breakdown.preference > 0.0)
            .map(|(position, _, _)| &self.catalog.movies()[*position])
            .collect();

        let mut unique_genres: Vec<String> = Vec::new();
        for genre in &profile.genres {
            if !unique_genres.contains(genre) {
                unique_genres.push(genre.clone());
            }
        }

        let most_matched_genre = unique_genres
            .iter()
            .map(|genre| {
                let count = matched.iter().filter(|movie| movie.has_genre(genre)).count();
                (genre, count)
            })
            .filter(|(_, count)| *count > 0)
            .max_by_key(|(_, count)| *count)
            .map(|(genre, _)| genre.clone());

        let mut genre_ratings: Vec<GenreRating> = unique_genres
            .iter()
            .filter_map(|genre| {
                let carriers: Vec<&Movie> = self
                    .catalog
                    .movies()
                    .iter()
                    .filter(|movie| movie.has_genre(genre))
                    .collect();
                if carriers.is_empty() {
                    return None;
                }
                let average =
                    carriers.iter().map(|movie| movie.rating).sum::<f64>() / carriers.len() as f64;
                Some(GenreRating {
                    genre: genre.clone(),
                    average_rating: average,
                    movie_count: carriers.len(),
                })
            })
            .collect();
        genre_ratings.sort_by(|a, b| b.average_rating.total_cmp(&a.average_rating));

        let top = &ranked[..ranked.len().min(DEFAULT_TOP_N)];
        let average_recommended_rating = if top.is_empty() {
            0.0
        } else {
            top.iter()
                .map(|(position, _, _)| self.catalog.movies()[*position].rating)
                .sum::<f64>()
                / top.len() as f64
        };

        let unexplored_genres: Vec<String> = self
            .features
            .vocabulary()
            .iter()
            .filter(|genre| !unique_genres.iter().any(|g| g == *genre))
            .cloned()
            .collect();

        TasteAnalysis {
            preferred_genres: unique_genres,
            catalog_size: self.catalog.len(),
            genre_ratings,
            most_matched_genre,
            matched_movies: matched.len(),
            average_recommended_rating,
            unexplored_genres,
        }
    }

    /// Scores every valid movie and sorts by the ranking order
    fn ranked(
        &self,
        scorer: &Scorer,
        exclude: Option<usize>,
    ) -> Vec<(usize, f64, ScoreBreakdown)> {
        let mut candidates: Vec<(usize, f64, ScoreBreakdown)> = self
            .catalog
            .movies()
            .iter()
            .enumerate()
            .filter(|(position, _)| exclude != Some(*position))
            .filter_map(|(position, movie)| {
                let vector = self.features.vector(position)?;
                let (score, breakdown) = scorer.score(movie, vector);
                Some((position, score, breakdown))
            })
            .collect();

        candidates.sort_by(|a, b| {
            let movie_a = &self.catalog.movies()[a.0];
            let movie_b = &self.catalog.movies()[b.0];
            rank_order(
                &RankKey {
                    score: a.1,
                    rating: movie_a.rating,
                    votes: movie_a.votes,
                    position: a.0,
                },
                &RankKey {
                    score: b.1,
                    rating: movie_b.rating,
                    votes: movie_b.votes,
                    position: b.0,
                },
            )
        });
        candidates
    }

    fn to_results(
        &self,
        profile: &PreferenceProfile,
        scorer: &Scorer,
        ranked: Vec<(usize, f64, ScoreBreakdown)>,
        top_n: usize,
    ) -> Vec<ScoredResult> {
        ranked
            .into_iter()
            .take(top_n)
            .map(|(position, score, breakdown)| {
                let movie = self.catalog.movies()[position].clone();
                let explanation = explain(&movie, profile, &breakdown, scorer.weight());
                ScoredResult {
                    movie,
                    score,
                    breakdown,
                    explanation,
                }
            })
            .collect()
    }
}
