//! Domain types for the title catalog with strong typing.
//!
//! This module provides type-safe wrappers and domain primitives for the
//! normalization pipeline. It follows the Newtype pattern to prevent raw
//! strings from flowing through identifier-shaped APIs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable external identifier of a title (e.g. `tt0000001`).
///
/// # Examples
///
/// ```rust
/// use normarr::domain::ImdbId;
///
/// let id = ImdbId::new("tt0000001");
/// assert_eq!(id.as_str(), "tt0000001");
/// assert_eq!(id.to_string(), "tt0000001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ImdbId(String);

impl ImdbId {
    /// Creates a new `ImdbId` from a raw string.
    ///
    /// # Panics
    ///
    /// Panics in debug mode if `id` is empty. Production code should validate
    /// before construction.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        debug_assert!(!id.is_empty(), "ImdbId should be non-empty");
        Self(id)
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id, returning the owned string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ImdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<ImdbId> for String {
    fn from(id: ImdbId) -> Self {
        id.0
    }
}

impl From<&str> for ImdbId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ImdbId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

impl Serialize for ImdbId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ImdbId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;
        Ok(Self::new(id))
    }
}

/// Title type vocabulary of the source catalog.
///
/// Only a subset is eligible for normalization; series-like types
/// additionally carry a `seasons` attribute in the output document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TitleType {
    Movie,
    TvSeries,
    TvMiniSeries,
    TvEpisode,
    TvMovie,
    TvSpecial,
    Short,
    Video,
    VideoGame,
}

impl TitleType {
    /// Parses a raw `title_type` column value. Unknown values yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "movie" => Some(Self::Movie),
            "tvSeries" => Some(Self::TvSeries),
            "tvMiniSeries" => Some(Self::TvMiniSeries),
            "tvEpisode" => Some(Self::TvEpisode),
            "tvMovie" => Some(Self::TvMovie),
            "tvSpecial" => Some(Self::TvSpecial),
            "short" => Some(Self::Short),
            "video" => Some(Self::Video),
            "videoGame" => Some(Self::VideoGame),
            _ => None,
        }
    }

    /// The raw column spelling of this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Movie => "movie",
            Self::TvSeries => "tvSeries",
            Self::TvMiniSeries => "tvMiniSeries",
            Self::TvEpisode => "tvEpisode",
            Self::TvMovie => "tvMovie",
            Self::TvSpecial => "tvSpecial",
            Self::Short => "short",
            Self::Video => "video",
            Self::VideoGame => "videoGame",
        }
    }

    /// Whether discovery schedules titles of this type for normalization.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        matches!(self, Self::Movie | Self::TvSeries | Self::TvMiniSeries)
    }

    /// Whether the normalized document carries a `seasons` mapping.
    #[must_use]
    pub const fn is_series(&self) -> bool {
        matches!(self, Self::TvSeries | Self::TvMiniSeries)
    }

    /// Raw spellings of all types eligible for discovery.
    #[must_use]
    pub const fn eligible() -> [&'static str; 3] {
        ["movie", "tvSeries", "tvMiniSeries"]
    }
}

impl fmt::Display for TitleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imdb_id_conversions() {
        let id = ImdbId::new("tt0000001");
        assert_eq!(id.as_str(), "tt0000001");
        assert_eq!(id.to_string(), "tt0000001");
        assert_eq!(String::from(id.clone()), "tt0000001");
        assert_eq!(ImdbId::from("tt0000001"), id);
    }

    #[test]
    fn imdb_id_serialization() {
        let id = ImdbId::new("tt0000002");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"tt0000002\"");
        let deserialized: ImdbId = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, id);
    }

    #[test]
    fn title_type_round_trip() {
        for raw in [
            "movie",
            "tvSeries",
            "tvMiniSeries",
            "tvEpisode",
            "tvMovie",
            "tvSpecial",
            "short",
            "video",
            "videoGame",
        ] {
            let parsed = TitleType::parse(raw).unwrap();
            assert_eq!(parsed.as_str(), raw);
        }
        assert_eq!(TitleType::parse("radioSeries"), None);
    }

    #[test]
    fn eligibility_and_series_flags() {
        assert!(TitleType::Movie.is_eligible());
        assert!(TitleType::TvSeries.is_eligible());
        assert!(TitleType::TvMiniSeries.is_eligible());
        assert!(!TitleType::TvEpisode.is_eligible());

        assert!(!TitleType::Movie.is_series());
        assert!(TitleType::TvSeries.is_series());
        assert!(TitleType::TvMiniSeries.is_series());
    }

    #[test]
    fn eligible_list_matches_flags() {
        for raw in TitleType::eligible() {
            assert!(TitleType::parse(raw).unwrap().is_eligible());
        }
    }
}
