use crate::auth::CurrentUser;
use crate::database::postgres_repository::SharedRepository;
use crate::database::tweet::TweetRepository;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::models::tweet::{DeleteTweetForm, TweetForm};
use crate::views::{FeedView, MyTweetsView, View};
use rocket::form::Form;
use rocket::response::Redirect;
use rocket::{State, routes};
use tracing::info;
use validator::Validate;

#[rocket::get("/home")]
pub async fn feed(repo: &State<SharedRepository>, current_user: CurrentUser) -> Result<View, AppError> {
    // A session can outlive its user row; treat that like an anonymous visit.
    let user = repo.get_user_by_id(current_user.id).await?.ok_or(AppError::Unauthenticated)?;
    let tweets = repo.list_feed().await?;

    Ok(View::Feed(FeedView {
        username: user.username,
        tweets,
    }))
}

#[rocket::get("/compose")]
pub fn compose(_current_user: CurrentUser) -> View {
    View::Compose
}

/// The author is always the session identity, never a form field.
#[rocket::post("/tweets", data = "<form>")]
pub async fn create_tweet(repo: &State<SharedRepository>, current_user: CurrentUser, form: Form<TweetForm>) -> Result<Redirect, AppError> {
    form.validate()?;

    let tweet = repo.create_tweet(current_user.id, &form.tweet).await?;
    info!(user_id = current_user.id, tweet_id = tweet.id, "tweet posted");

    Ok(Redirect::to("/home"))
}

#[rocket::get("/tweets")]
pub fn create_tweet_wrong_method() -> Redirect {
    Redirect::to("/")
}

#[rocket::get("/my-tweets")]
pub async fn my_tweets(repo: &State<SharedRepository>, current_user: CurrentUser) -> Result<View, AppError> {
    let tweets = repo.list_tweets_by_user(current_user.id).await?;
    Ok(View::MyTweets(MyTweetsView { tweets }))
}

/// Deletes by id without checking who wrote the tweet.
#[rocket::post("/tweets/delete", data = "<form>")]
pub async fn delete_tweet(repo: &State<SharedRepository>, current_user: CurrentUser, form: Form<DeleteTweetForm>) -> Result<Redirect, AppError> {
    let deleted = repo.delete_tweet(form.id).await?;
    info!(user_id = current_user.id, tweet_id = form.id, deleted, "tweet delete requested");

    Ok(Redirect::to("/my-tweets"))
}

#[rocket::get("/tweets/delete")]
pub fn delete_tweet_wrong_method() -> Redirect {
    Redirect::to("/")
}

pub fn routes() -> Vec<rocket::Route> {
    routes![
        feed,
        compose,
        create_tweet,
        create_tweet_wrong_method,
        my_tweets,
        delete_tweet,
        delete_tweet_wrong_method
    ]
}
