use chrono::{DateTime, Utc};
use rocket::FromForm;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Tweet {
    pub id: i64,
    #[sqlx(rename = "userid")]
    pub user_id: i64,
    #[sqlx(rename = "tweet_text")]
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// A feed row: the tweet joined with its author's username.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TweetWithAuthor {
    #[sqlx(flatten)]
    pub tweet: Tweet,
    pub username: String,
}

#[derive(Debug, FromForm, Validate)]
pub struct TweetForm {
    #[field(default = String::new())]
    #[validate(length(min = 1, message = "tweet must not be empty"))]
    pub tweet: String,
}

#[derive(Debug, FromForm)]
pub struct DeleteTweetForm {
    pub id: i64,
}
