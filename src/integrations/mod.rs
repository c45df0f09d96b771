pub mod github;
pub mod repository;
