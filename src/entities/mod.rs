pub mod prelude;

pub mod anime;
pub mod anime_names;
pub mod anime_responses;
pub mod responses;
pub mod results_cache;
pub mod survey_additions_removals;
pub mod surveys;
