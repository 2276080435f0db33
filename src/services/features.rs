use std::collections::BTreeSet;

use crate::catalog::Catalog;

/// Numeric representation of one movie
///
/// `genres` holds one indicator slot per vocabulary entry, in vocabulary
/// order, so vectors from the same catalog snapshot are directly
/// comparable. The scalars are normalized to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub genres: Vec<f64>,
    /// rating / 10
    pub rating: f64,
    /// vote count relative to the catalog maximum
    pub votes: f64,
    /// release year, min-max normalized over the catalog
    pub year: f64,
}

/// A catalog row whose feature vector could not be built
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRow {
    pub title: String,
    pub reason: String,
}

/// Feature vectors for one catalog snapshot
///
/// Built eagerly when the engine takes a snapshot and replaced wholesale on
/// reload; vectors are never patched in place. Rows that fail validation
/// get no vector and are excluded from every query.
#[derive(Debug, Clone)]
pub struct FeatureSet {
    vocabulary: Vec<String>,
    vectors: Vec<Option<FeatureVector>>,
    skipped: Vec<SkippedRow>,
}

impl FeatureSet {
    /// Builds features for every valid row of the catalog
    ///
    /// A row is invalid when its rating falls outside [0, 10] or its genre
    /// list is empty after cleaning. Invalid rows are reported and skipped;
    /// the rest of the catalog still builds.
    pub fn build(catalog: &Catalog) -> Self {
        let mut invalid_reasons: Vec<Option<String>> = Vec::with_capacity(catalog.len());
        for movie in catalog.movies() {
            let reason = if !(0.0..=10.0).contains(&movie.rating) {
                Some(format!("rating {} outside [0, 10]", movie.rating))
            } else if movie.genres.is_empty() {
                Some("no genres after cleaning".to_string())
            } else {
                None
            };
            invalid_reasons.push(reason);
        }

        // Vocabulary: sorted union of the genres of valid rows
        let vocabulary: Vec<String> = catalog
            .movies()
            .iter()
            .zip(&invalid_reasons)
            .filter(|(_, reason)| reason.is_none())
            .flat_map(|(movie, _)| movie.genres.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let valid_movies = || {
            catalog
                .movies()
                .iter()
                .zip(&invalid_reasons)
                .filter(|(_, reason)| reason.is_none())
                .map(|(movie, _)| movie)
        };
        let max_votes = valid_movies().map(|m| m.votes).max().unwrap_or(0);
        let min_year = valid_movies().map(|m| m.year).min().unwrap_or(0);
        let max_year = valid_movies().map(|m| m.year).max().unwrap_or(0);
        let year_span = (max_year - min_year) as f64;

        let mut vectors = Vec::with_capacity(catalog.len());
        let mut skipped = Vec::new();
        for (movie, reason) in catalog.movies().iter().zip(&invalid_reasons) {
            if let Some(reason) = reason {
                tracing::warn!(
                    title = %movie.title,
                    reason = %reason,
                    "Skipping invalid catalog row"
                );
                skipped.push(SkippedRow {
                    title: movie.title.clone(),
                    reason: reason.clone(),
                });
                vectors.push(None);
                continue;
            }

            let genres = vocabulary
                .iter()
                .map(|genre| if movie.has_genre(genre) { 1.0 } else { 0.0 })
                .collect();
            vectors.push(Some(FeatureVector {
                genres,
                rating: movie.rating / 10.0,
                votes: if max_votes == 0 {
                    0.0
                } else {
                    movie.votes as f64 / max_votes as f64
                },
                year: if year_span == 0.0 {
                    0.0
                } else {
                    (movie.year - min_year) as f64 / year_span
                },
            }));
        }

        Self {
            vocabulary,
            vectors,
            skipped,
        }
    }

    /// The catalog's genre vocabulary, sorted alphabetically
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    pub fn contains_genre(&self, genre: &str) -> bool {
        self.vocabulary.binary_search_by(|g| g.as_str().cmp(genre)).is_ok()
    }

    /// Feature vector for the movie at the given catalog position, if the
    /// row was valid
    pub fn vector(&self, position: usize) -> Option<&FeatureVector> {
        self.vectors.get(position).and_then(Option::as_ref)
    }

    /// Indicator vector over the vocabulary for a list of preferred genres
    ///
    /// Genres outside the vocabulary contribute nothing; the dot product of
    /// this vector with a movie's genre slots counts the genre overlap.
    pub fn profile_vector(&self, genres: &[String]) -> Vec<f64> {
        let mut vector = vec![0.0; self.vocabulary.len()];
        for genre in genres {
            if let Ok(slot) = self.vocabulary.binary_search_by(|g| g.as_str().cmp(genre.as_str())) {
                vector[slot] = 1.0;
            }
        }
        vector
    }

    pub fn skipped(&self) -> &[SkippedRow] {
        &self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RawMovieRecord;

    fn record(title: &str, genre: &str, rating: f64, votes: u64, year: i32) -> RawMovieRecord {
        RawMovieRecord {
            title: title.to_string(),
            year,
            genre: genre.to_string(),
            director: "Director".to_string(),
            actors: "Actor".to_string(),
            imdb_rating: rating,
            imdb_votes: votes,
            description: String::new(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_records(vec![
            record("A", "Drama", 9.0, 1000, 1994),
            record("B", "Crime, Drama", 8.5, 2000, 2008),
            record("C", "Action", 7.0, 500, 2001),
        ])
    }

    #[test]
    fn test_vocabulary_is_sorted_union() {
        let features = FeatureSet::build(&catalog());
        assert_eq!(features.vocabulary(), ["Action", "Crime", "Drama"]);
        assert!(features.contains_genre("Crime"));
        assert!(!features.contains_genre("Comedy"));
    }

    #[test]
    fn test_genre_slots_follow_vocabulary_order() {
        let features = FeatureSet::build(&catalog());
        // B carries Crime and Drama
        let vector = features.vector(1).unwrap();
        assert_eq!(vector.genres, vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_scalar_normalization() {
        let features = FeatureSet::build(&catalog());
        let a = features.vector(0).unwrap();
        assert!((a.rating - 0.9).abs() < 1e-12);
        assert!((a.votes - 0.5).abs() < 1e-12);
        // 1994 over the 1994..2008 span
        assert!(a.year.abs() < 1e-12);
        let b = features.vector(1).unwrap();
        assert!((b.year - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_rows_are_skipped_not_fatal() {
        let catalog = Catalog::from_records(vec![
            record("Good", "Drama", 8.0, 100, 2000),
            record("BadRating", "Drama", 11.0, 100, 2000),
            record("NoGenres", " , ", 7.0, 100, 2000),
        ]);
        let features = FeatureSet::build(&catalog);
        assert!(features.vector(0).is_some());
        assert!(features.vector(1).is_none());
        assert!(features.vector(2).is_none());
        assert_eq!(features.skipped().len(), 2);
        assert!(features.skipped()[0].reason.contains("rating"));
        assert!(features.skipped()[1].reason.contains("genres"));
    }

    #[test]
    fn test_invalid_rows_do_not_pollute_vocabulary() {
        let catalog = Catalog::from_records(vec![
            record("Good", "Drama", 8.0, 100, 2000),
            record("BadRating", "Western", 11.0, 100, 2000),
        ]);
        let features = FeatureSet::build(&catalog);
        assert_eq!(features.vocabulary(), ["Drama"]);
    }

    #[test]
    fn test_profile_vector_ignores_unknown_genres() {
        let features = FeatureSet::build(&catalog());
        let vector = features.profile_vector(&[
            "Drama".to_string(),
            "Romance".to_string(),
        ]);
        assert_eq!(vector, vec![0.0, 0.0, 1.0]);
    }
}
