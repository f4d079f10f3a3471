pub mod results_service;
pub mod results_service_impl;

pub use results_service::{IndexEntry, ResultsError, ResultsService};
pub use results_service_impl::SeaOrmResultsService;
