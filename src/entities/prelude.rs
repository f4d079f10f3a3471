pub use super::anime::Entity as Anime;
pub use super::anime_names::Entity as AnimeNames;
pub use super::anime_responses::Entity as AnimeResponses;
pub use super::responses::Entity as Responses;
pub use super::results_cache::Entity as ResultsCache;
pub use super::survey_additions_removals::Entity as SurveyAdditionsRemovals;
pub use super::surveys::Entity as Surveys;
