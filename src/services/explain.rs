use crate::{
    models::{Movie, PreferenceProfile, ScoreBreakdown},
    services::scoring::{ACTOR_WEIGHT, DIRECTOR_WEIGHT, GENRE_WEIGHT},
};

/// Generates the human-readable justification for one ranked result
///
/// Lists each signal that contributed positively to the combined score, in
/// descending order of its actual contribution: taste signals weigh in at
/// `weight * signal_weight * term` and the rating at
/// `(1 - weight) * quality`, with the same constants the scorer applied.
/// Deterministic; ties keep the genre/actor/director/rating order.
pub fn explain(
    movie: &Movie,
    profile: &PreferenceProfile,
    breakdown: &ScoreBreakdown,
    weight: f64,
) -> String {
    let mut reasons: Vec<(f64, String)> = Vec::new();

    let genre_contribution = weight * GENRE_WEIGHT * breakdown.genre_overlap;
    if genre_contribution > 0.0 {
        let shared = shared_genres(movie, profile);
        reasons.push((
            genre_contribution,
            format!("Matches your preferred genres: {}", shared.join(", ")),
        ));
    }

    if breakdown.actor_match {
        let favorites = shared_people(&movie.cast, &profile.actors);
        reasons.push((
            weight * ACTOR_WEIGHT,
            format!("Features your favorite actors: {}", favorites.join(", ")),
        ));
    }

    if breakdown.director_match {
        reasons.push((
            weight * DIRECTOR_WEIGHT,
            format!("Directed by your favorite director: {}", movie.director),
        ));
    }

    let rating_contribution = (1.0 - weight) * breakdown.quality;
    if rating_contribution > 0.0 {
        reasons.push((rating_contribution, rating_line(movie.rating)));
    }

    if reasons.is_empty() {
        return "Recommended based on overall popularity and quality".to_string();
    }

    // Stable sort: equal contributions keep signal order
    reasons.sort_by(|a, b| b.0.total_cmp(&a.0));
    reasons
        .into_iter()
        .map(|(_, text)| text)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn rating_line(rating: f64) -> String {
    if rating >= 8.0 {
        format!("Highly rated with {:.1}/10 on IMDB", rating)
    } else if rating >= 7.0 {
        format!("Well-rated with {:.1}/10 on IMDB", rating)
    } else {
        format!("Rated {:.1}/10 on IMDB", rating)
    }
}

/// Movie genres that appear among the profile's preferences, in movie order
fn shared_genres(movie: &Movie, profile: &PreferenceProfile) -> Vec<String> {
    movie
        .genres
        .iter()
        .filter(|genre| profile.genres.iter().any(|p| p == *genre))
        .cloned()
        .collect()
}

/// Cast members that appear among the profile's favorites, case-insensitive
fn shared_people(cast: &[String], favorites: &[String]) -> Vec<String> {
    cast.iter()
        .filter(|member| {
            favorites
                .iter()
                .any(|favorite| favorite.eq_ignore_ascii_case(member))
        })
        .cloned()
        .collect()
}
