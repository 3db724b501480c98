use crate::database::tweet::TweetRepository;
use crate::database::user::UserRepository;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct PostgresRepository {
    pub pool: PgPool,
}

/// Everything a route handler needs from the store.
pub trait Repository: UserRepository + TweetRepository {}

impl<T: UserRepository + TweetRepository> Repository for T {}

/// Managed by Rocket and borrowed by handlers through `&State<SharedRepository>`.
pub type SharedRepository = Arc<dyn Repository>;
