pub use super::documents::Entity as Documents;
pub use super::queued_jobs::Entity as QueuedJobs;
pub use super::title_basics::Entity as TitleBasics;
pub use super::title_episode::Entity as TitleEpisode;
pub use super::title_ratings::Entity as TitleRatings;
