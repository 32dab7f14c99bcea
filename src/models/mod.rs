pub mod title;

pub use title::{EpisodeSummary, NormalizedRating, NormalizedTitle, Seasons, split_genres};
