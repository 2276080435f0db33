//! OMDb API provider
//!
//! Looks movie metadata up by title (`?t=<title>&type=movie`) and converts
//! the response into a raw catalog record. OMDb serves every field as a
//! string, including numbers, and uses "N/A" for anything missing, so most
//! of the work here is field parsing.

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    catalog::RawMovieRecord,
    error::{AppError, AppResult},
    services::providers::CatalogProvider,
};

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

/// Raw OMDb title response
#[derive(Debug, Clone, Deserialize)]
struct OmdbTitle {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error", default)]
    error: Option<String>,
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "imdbVotes", default)]
    imdb_votes: String,
    #[serde(rename = "Plot", default)]
    plot: String,
}

/// Parses an OMDb year field: "2010", or "2010-2012" for series reruns
/// tagged as movies
fn parse_year(raw: &str) -> AppResult<i32> {
    let digits: String = raw.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits
        .parse()
        .map_err(|_| AppError::ExternalApi(format!("OMDb returned unparseable year '{}'", raw)))
}

/// Parses an OMDb rating field; "N/A" means the title has no rating yet
fn parse_rating(raw: &str) -> AppResult<f64> {
    raw.parse()
        .map_err(|_| AppError::ExternalApi(format!("OMDb returned unparseable rating '{}'", raw)))
}

/// Parses an OMDb vote count like "1,234,567"; missing counts become 0
fn parse_votes(raw: &str) -> u64 {
    raw.replace(',', "").parse().unwrap_or(0)
}

impl OmdbTitle {
    fn into_record(self) -> AppResult<RawMovieRecord> {
        Ok(RawMovieRecord {
            year: parse_year(&self.year)?,
            imdb_rating: parse_rating(&self.imdb_rating)?,
            imdb_votes: parse_votes(&self.imdb_votes),
            title: self.title,
            genre: self.genre,
            director: self.director,
            actors: self.actors,
            description: if self.plot == "N/A" {
                String::new()
            } else {
                self.plot
            },
        })
    }
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }
}

#[async_trait::async_trait]
impl CatalogProvider for OmdbProvider {
    async fn lookup_title(&self, title: &str) -> AppResult<RawMovieRecord> {
        let response = self
            .http_client
            .get(&self.api_url)
            .query(&[
                ("apikey", self.api_key.as_str()),
                ("t", title),
                ("type", "movie"),
                ("plot", "short"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        let omdb_title: OmdbTitle = response.json().await?;
        if omdb_title.response != "True" {
            return Err(AppError::ExternalApi(format!(
                "OMDb lookup failed for '{}': {}",
                title,
                omdb_title.error.as_deref().unwrap_or("unknown error")
            )));
        }

        tracing::debug!(title = %omdb_title.title, "OMDb lookup succeeded");
        omdb_title.into_record()
    }

    fn clone_for_task(&self) -> Box<dyn CatalogProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_year_variants() {
        assert_eq!(parse_year("2010").unwrap(), 2010);
        assert_eq!(parse_year("2010-2012").unwrap(), 2010);
        assert!(parse_year("N/A").is_err());
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("8.8").unwrap(), 8.8);
        assert!(parse_rating("N/A").is_err());
    }

    #[test]
    fn test_parse_votes_strips_separators() {
        assert_eq!(parse_votes("1,234,567"), 1_234_567);
        assert_eq!(parse_votes("N/A"), 0);
    }

    #[test]
    fn test_successful_response_into_record() {
        let omdb_title: OmdbTitle = serde_json::from_value(json!({
            "Title": "Inception",
            "Year": "2010",
            "Genre": "Action, Adventure, Sci-Fi",
            "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt",
            "Plot": "A thief who steals corporate secrets.",
            "imdbRating": "8.8",
            "imdbVotes": "2,600,000",
            "Response": "True"
        }))
        .unwrap();

        let record = omdb_title.into_record().unwrap();
        assert_eq!(record.title, "Inception");
        assert_eq!(record.year, 2010);
        assert_eq!(record.imdb_rating, 8.8);
        assert_eq!(record.imdb_votes, 2_600_000);
        assert_eq!(record.genre, "Action, Adventure, Sci-Fi");
    }

    #[test]
    fn test_missing_plot_becomes_empty() {
        let omdb_title: OmdbTitle = serde_json::from_value(json!({
            "Title": "Obscure",
            "Year": "1963",
            "Genre": "Drama",
            "Director": "Nobody",
            "Actors": "Nobody Else",
            "Plot": "N/A",
            "imdbRating": "6.2",
            "imdbVotes": "N/A",
            "Response": "True"
        }))
        .unwrap();

        let record = omdb_title.into_record().unwrap();
        assert_eq!(record.description, "");
        assert_eq!(record.imdb_votes, 0);
    }

    #[test]
    fn test_error_response_deserializes() {
        let omdb_title: OmdbTitle = serde_json::from_value(json!({
            "Response": "False",
            "Error": "Movie not found!"
        }))
        .unwrap();
        assert_eq!(omdb_title.response, "False");
        assert_eq!(omdb_title.error.as_deref(), Some("Movie not found!"));
    }
}
