use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::{Movie, MovieId},
};

/// Embedded starter dataset, used when no catalog file is configured
const STARTER_CATALOG: &str = include_str!("../../data/starter_catalog.json");

/// A movie row as it arrives from the data source
///
/// Genre and actor fields are comma-separated strings; the catalog splits
/// and trims them during loading. Vote counts and synopses are optional in
/// the wild and default to empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawMovieRecord {
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub director: String,
    pub actors: String,
    pub imdb_rating: f64,
    #[serde(default)]
    pub imdb_votes: u64,
    #[serde(default)]
    pub description: String,
}

/// Splits a comma-separated field into trimmed, non-empty parts
fn split_list_field(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty() && *part != "nan" && *part != "N/A")
        .map(str::to_string)
        .collect()
}

impl RawMovieRecord {
    fn into_movie(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title.trim().to_string(),
            year: self.year,
            genres: split_list_field(&self.genre),
            director: self.director.trim().to_string(),
            cast: split_list_field(&self.actors),
            rating: self.imdb_rating,
            votes: self.imdb_votes,
            synopsis: self.description.trim().to_string(),
        }
    }
}

/// The in-memory movie table
///
/// Insertion order is preserved (it is the final ranking tie-breaker) and
/// entries are never mutated after loading. Queries resolve ids through a
/// side index.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    index: HashMap<MovieId, usize>,
}

impl Catalog {
    /// Builds a catalog from raw records, assigning fresh ids
    ///
    /// Cleaning happens here; schema validation (rating range, non-empty
    /// genres) is the feature builder's job so that a malformed row costs
    /// only its own feature vector, not the load.
    pub fn from_records(records: Vec<RawMovieRecord>) -> Self {
        let movies: Vec<Movie> = records
            .into_iter()
            .map(|record| record.into_movie(MovieId::new()))
            .collect();
        Self::from_movies(movies)
    }

    fn from_movies(movies: Vec<Movie>) -> Self {
        let index = movies
            .iter()
            .enumerate()
            .map(|(position, movie)| (movie.id, position))
            .collect();
        Self { movies, index }
    }

    /// Loads a catalog from a JSON file holding an array of raw records
    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| AppError::Catalog(format!("cannot read {}: {}", path.display(), e)))?;
        let records: Vec<RawMovieRecord> = serde_json::from_str(&contents)
            .map_err(|e| AppError::Catalog(format!("cannot parse {}: {}", path.display(), e)))?;
        tracing::info!(path = %path.display(), rows = records.len(), "Catalog loaded from file");
        Ok(Self::from_records(records))
    }

    /// The built-in starter catalog
    pub fn starter() -> Self {
        let records: Vec<RawMovieRecord> =
            serde_json::from_str(STARTER_CATALOG).expect("starter catalog is valid JSON");
        Self::from_records(records)
    }

    /// Produces a new catalog with the given records merged in
    ///
    /// A record matching an existing entry (case-insensitive title plus
    /// year) replaces it in place and keeps its id, so ids already handed
    /// to clients stay valid across a refresh. Everything else is appended.
    pub fn merged_with(&self, records: Vec<RawMovieRecord>) -> Self {
        let mut movies = self.movies.clone();
        let mut by_key: HashMap<(String, i32), usize> = movies
            .iter()
            .enumerate()
            .map(|(position, movie)| ((movie.title.to_lowercase(), movie.year), position))
            .collect();

        let mut replaced = 0usize;
        let mut appended = 0usize;
        for record in records {
            let key = (record.title.trim().to_lowercase(), record.year);
            if let Some(&position) = by_key.get(&key) {
                let id = movies[position].id;
                movies[position] = record.into_movie(id);
                replaced += 1;
            } else {
                let movie = record.into_movie(MovieId::new());
                by_key.insert(key, movies.len());
                movies.push(movie);
                appended += 1;
            }
        }

        tracing::info!(replaced, appended, total = movies.len(), "Catalog merged");
        Self::from_movies(movies)
    }

    pub fn get(&self, id: &MovieId) -> Option<&Movie> {
        self.index.get(id).map(|&position| &self.movies[position])
    }

    /// Position of a movie in insertion order
    pub fn position(&self, id: &MovieId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
