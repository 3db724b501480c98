use crate::database::postgres_repository::PostgresRepository;
use crate::error::app_error::AppError;
use crate::models::tweet::{Tweet, TweetWithAuthor};

#[async_trait::async_trait]
pub trait TweetRepository: Send + Sync {
    async fn create_tweet(&self, user_id: i64, text: &str) -> Result<Tweet, AppError>;
    /// All tweets with their author's username, newest first.
    async fn list_feed(&self) -> Result<Vec<TweetWithAuthor>, AppError>;
    async fn list_tweets_by_user(&self, user_id: i64) -> Result<Vec<Tweet>, AppError>;
    /// Deletes by id regardless of author. Returns whether a row was removed.
    async fn delete_tweet(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait::async_trait]
impl TweetRepository for PostgresRepository {
    async fn create_tweet(&self, user_id: i64, text: &str) -> Result<Tweet, AppError> {
        let tweet = sqlx::query_as::<_, Tweet>(
            r#"
            INSERT INTO tweets (userid, tweet_text)
            VALUES ($1, $2)
            RETURNING id, userid, tweet_text, created_at
            "#,
        )
        .bind(user_id)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(tweet)
    }

    async fn list_feed(&self) -> Result<Vec<TweetWithAuthor>, AppError> {
        let tweets = sqlx::query_as::<_, TweetWithAuthor>(
            r#"
            SELECT t.id, t.userid, t.tweet_text, t.created_at, u.username
            FROM tweets t
            JOIN users u ON t.userid = u.id
            ORDER BY t.id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tweets)
    }

    async fn list_tweets_by_user(&self, user_id: i64) -> Result<Vec<Tweet>, AppError> {
        let tweets = sqlx::query_as::<_, Tweet>(
            r#"
            SELECT id, userid, tweet_text, created_at
            FROM tweets
            WHERE userid = $1
            ORDER BY id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tweets)
    }

    async fn delete_tweet(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tweets WHERE id = $1").bind(id).execute(&self.pool).await?;

        Ok(result.rows_affected() > 0)
    }
}
