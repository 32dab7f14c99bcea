//! Wire-shaped document models produced by normalization.
//!
//! These are serde models, not database entities: field names follow the
//! document store's camelCase convention and `seasons` is omitted entirely
//! for non-series titles rather than serialized as null.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Season number to ordered episode summaries. A `BTreeMap` keeps season
/// keys sorted so serialized documents are deterministic.
pub type Seasons = BTreeMap<i32, Vec<EpisodeSummary>>;

/// One rating attached to a title, tagged with its source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRating {
    pub source: String,
    pub value: f64,
    pub votes: i32,
}

/// Summary of one episode inside a season listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeSummary {
    pub imdb_id: String,
    pub episode_number: Option<i32>,
    pub primary_title: String,
    pub original_title: String,
    pub runtime_minutes: Option<i32>,
}

/// The denormalized per-title document, replaced wholesale on every run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTitle {
    pub imdb_id: String,
    pub primary_title: String,
    pub original_title: String,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub runtime_minutes: Option<i32>,
    pub title_type: String,
    pub is_adult: bool,
    pub genres: Vec<String>,
    pub ratings: Vec<NormalizedRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Seasons>,
}

/// Splits the source's comma-delimited genre string into tags.
///
/// Absent or empty input yields an empty vec, never a null-shaped value.
#[must_use]
pub fn split_genres(raw: Option<&str>) -> Vec<String> {
    raw.map_or_else(Vec::new, |s| {
        s.split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_genres_basic() {
        assert_eq!(
            split_genres(Some("Comedy,Drama,Romance")),
            vec!["Comedy", "Drama", "Romance"]
        );
    }

    #[test]
    fn split_genres_absent_or_empty() {
        assert!(split_genres(None).is_empty());
        assert!(split_genres(Some("")).is_empty());
        assert!(split_genres(Some(" , ")).is_empty());
    }

    #[test]
    fn seasons_field_omitted_when_absent() {
        let title = NormalizedTitle {
            imdb_id: "tt0000001".to_string(),
            primary_title: "Carmencita".to_string(),
            original_title: "Carmencita".to_string(),
            start_year: Some(1894),
            end_year: None,
            runtime_minutes: Some(1),
            title_type: "movie".to_string(),
            is_adult: false,
            genres: vec!["Documentary".to_string(), "Short".to_string()],
            ratings: vec![],
            seasons: None,
        };

        let json = serde_json::to_value(&title).unwrap();
        assert!(json.get("seasons").is_none());
        assert_eq!(json["imdbId"], "tt0000001");
        assert_eq!(json["genres"], serde_json::json!(["Documentary", "Short"]));
    }

    #[test]
    fn seasons_keys_serialize_sorted() {
        let episode = |id: &str, number: i32| EpisodeSummary {
            imdb_id: id.to_string(),
            episode_number: Some(number),
            primary_title: format!("Episode {number}"),
            original_title: format!("Episode {number}"),
            runtime_minutes: None,
        };

        let mut seasons = Seasons::new();
        seasons.insert(2, vec![episode("tt0000012", 1)]);
        seasons.insert(1, vec![episode("tt0000010", 1), episode("tt0000011", 2)]);

        let title = NormalizedTitle {
            imdb_id: "tt0000002".to_string(),
            primary_title: "Some Series".to_string(),
            original_title: "Some Series".to_string(),
            start_year: Some(1999),
            end_year: None,
            runtime_minutes: None,
            title_type: "tvSeries".to_string(),
            is_adult: false,
            genres: vec![],
            ratings: vec![],
            seasons: Some(seasons),
        };

        let json = serde_json::to_string(&title).unwrap();
        let one = json.find("\"1\":").unwrap();
        let two = json.find("\"2\":").unwrap();
        assert!(one < two);
    }
}
