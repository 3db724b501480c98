pub mod postgres_repository;
pub mod tweet;
pub mod user;
