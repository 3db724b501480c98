use crate::database::postgres_repository::SharedRepository;
use crate::database::tweet::TweetRepository;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::models::tweet::{Tweet, TweetWithAuthor};
use crate::models::user::User;
use crate::{Config, build_rocket_with_repository};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::Utc;
use rocket::local::asynchronous::Client;
use sha2::{Digest, Sha256};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

#[derive(Default)]
struct Tables {
    users: Vec<(User, String)>,
    tweets: Vec<Tweet>,
    next_user_id: i64,
    next_tweet_id: i64,
}

/// Store double with the same ordering and uniqueness guarantees as the Postgres schema.
/// The username check and the insert happen under one lock, like the unique index.
#[derive(Default)]
pub struct InMemoryRepository {
    tables: Mutex<Tables>,
}

impl InMemoryRepository {
    pub fn tweet_count(&self) -> usize {
        self.tables.lock().unwrap().tweets.len()
    }

    pub fn user_count(&self) -> usize {
        self.tables.lock().unwrap().users.len()
    }
}

#[async_trait::async_trait]
impl UserRepository for InMemoryRepository {
    async fn create_user(&self, username: &str, password: &str) -> Result<User, AppError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|(u, _)| u.username == username) {
            return Err(AppError::UsernameTaken(username.to_string()));
        }

        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            username: username.to_string(),
        };
        tables.users.push((user.clone(), password.to_string()));
        Ok(user)
    }

    async fn username_exists(&self, username: &str) -> Result<bool, AppError> {
        Ok(self.tables.lock().unwrap().users.iter().any(|(u, _)| u.username == username))
    }

    async fn find_user_by_credentials(&self, username: &str, password: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|(u, stored)| u.username == username && stored == password)
            .map(|(u, _)| u.clone()))
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        Ok(self.tables.lock().unwrap().users.iter().find(|(u, _)| u.id == id).map(|(u, _)| u.clone()))
    }
}

#[async_trait::async_trait]
impl TweetRepository for InMemoryRepository {
    async fn create_tweet(&self, user_id: i64, text: &str) -> Result<Tweet, AppError> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_tweet_id += 1;
        let tweet = Tweet {
            id: tables.next_tweet_id,
            user_id,
            text: text.to_string(),
            created_at: Utc::now(),
        };
        tables.tweets.push(tweet.clone());
        Ok(tweet)
    }

    async fn list_feed(&self) -> Result<Vec<TweetWithAuthor>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut feed: Vec<TweetWithAuthor> = tables
            .tweets
            .iter()
            .filter_map(|tweet| {
                let (author, _) = tables.users.iter().find(|(u, _)| u.id == tweet.user_id)?;
                Some(TweetWithAuthor {
                    tweet: tweet.clone(),
                    username: author.username.clone(),
                })
            })
            .collect();
        feed.sort_by(|a, b| b.tweet.id.cmp(&a.tweet.id));
        Ok(feed)
    }

    async fn list_tweets_by_user(&self, user_id: i64) -> Result<Vec<Tweet>, AppError> {
        let tables = self.tables.lock().unwrap();
        let mut tweets: Vec<Tweet> = tables.tweets.iter().filter(|t| t.user_id == user_id).cloned().collect();
        tweets.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(tweets)
    }

    async fn delete_tweet(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.tweets.len();
        tables.tweets.retain(|t| t.id != id);
        Ok(tables.tweets.len() != before)
    }
}

/// Store double whose every call fails, for exercising the 500 path.
pub struct FailingRepository;

fn store_down() -> AppError {
    AppError::db("Database error", sqlx::Error::PoolTimedOut)
}

#[async_trait::async_trait]
impl UserRepository for FailingRepository {
    async fn create_user(&self, _username: &str, _password: &str) -> Result<User, AppError> {
        Err(store_down())
    }

    async fn username_exists(&self, _username: &str) -> Result<bool, AppError> {
        Err(store_down())
    }

    async fn find_user_by_credentials(&self, _username: &str, _password: &str) -> Result<Option<User>, AppError> {
        Err(store_down())
    }

    async fn get_user_by_id(&self, _id: i64) -> Result<Option<User>, AppError> {
        Err(store_down())
    }
}

#[async_trait::async_trait]
impl TweetRepository for FailingRepository {
    async fn create_tweet(&self, _user_id: i64, _text: &str) -> Result<Tweet, AppError> {
        Err(store_down())
    }

    async fn list_feed(&self) -> Result<Vec<TweetWithAuthor>, AppError> {
        Err(store_down())
    }

    async fn list_tweets_by_user(&self, _user_id: i64) -> Result<Vec<Tweet>, AppError> {
        Err(store_down())
    }

    async fn delete_tweet(&self, _id: i64) -> Result<bool, AppError> {
        Err(store_down())
    }
}

/// A fresh 256-bit base64 secret so that no two test servers share a signing key.
pub fn random_secret_key() -> String {
    let digest = Sha256::digest(Uuid::new_v4().as_bytes());
    STANDARD.encode(digest)
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.session.secret_key = Some(random_secret_key());
    config
}

pub async fn client_with(repository: SharedRepository) -> Client {
    let rocket = build_rocket_with_repository(test_config(), repository).expect("test config has a secret");
    Client::tracked(rocket)
        .await
        .expect("valid rocket instance")
}

pub async fn test_client() -> (Client, Arc<InMemoryRepository>) {
    let repository = Arc::new(InMemoryRepository::default());
    let client = client_with(repository.clone()).await;
    (client, repository)
}
