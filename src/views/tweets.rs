use super::layout::{nav, page};
use crate::models::tweet::{Tweet, TweetWithAuthor};
use chrono::{DateTime, Utc};
use maud::{Markup, html};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedView {
    pub username: String,
    pub tweets: Vec<TweetWithAuthor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MyTweetsView {
    pub tweets: Vec<Tweet>,
}

fn timestamp(at: &DateTime<Utc>) -> Markup {
    html! {
        time datetime=(at.to_rfc3339()) { (at.format("%Y-%m-%d %H:%M").to_string()) }
    }
}

pub(super) fn feed(view: &FeedView) -> Markup {
    page(
        "Home",
        html! {
            (nav())
            h1 { "Welcome, " (view.username) }
            @if view.tweets.is_empty() {
                p { "No tweets yet." }
            }
            @for item in &view.tweets {
                article class="tweet" data-id=(item.tweet.id) {
                    span class="author" { "@" (item.username) }
                    " "
                    (timestamp(&item.tweet.created_at))
                    p { (item.tweet.text) }
                }
            }
        },
    )
}

pub(super) fn compose() -> Markup {
    page(
        "New tweet",
        html! {
            (nav())
            h1 { "What's happening?" }
            form method="post" action="/tweets" {
                textarea name="tweet" required {}
                button type="submit" { "Tweet" }
            }
        },
    )
}

pub(super) fn my_tweets(view: &MyTweetsView) -> Markup {
    page(
        "My tweets",
        html! {
            (nav())
            h1 { "My tweets" }
            @if view.tweets.is_empty() {
                p { "You have not tweeted yet." }
            }
            @for tweet in &view.tweets {
                article class="tweet" data-id=(tweet.id) {
                    (timestamp(&tweet.created_at))
                    p { (tweet.text) }
                    form method="post" action="/tweets/delete" {
                        input type="hidden" name="id" value=(tweet.id);
                        button type="submit" { "Delete" }
                    }
                }
            }
        },
    )
}
