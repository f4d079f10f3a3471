pub mod anime;
pub mod response;
pub mod survey;
