pub mod post_repository;
pub mod post_store;
