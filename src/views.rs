//! HTML rendering. Each page has its own typed payload, selected through [`View`].

mod auth;
mod layout;
mod tweets;

pub use auth::{LoginView, RegisterFlag, RegisterView};
pub use tweets::{FeedView, MyTweetsView};

use maud::Markup;
use rocket::Request;
use rocket::response::content::RawHtml;
use rocket::response::{self, Responder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Login(LoginView),
    Register(RegisterView),
    Feed(FeedView),
    Compose,
    MyTweets(MyTweetsView),
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Login(_) => "login",
            View::Register(_) => "register",
            View::Feed(_) => "home",
            View::Compose => "compose",
            View::MyTweets(_) => "my_tweets",
        }
    }

    pub fn render(&self) -> Markup {
        match self {
            View::Login(view) => auth::login(view),
            View::Register(view) => auth::register(view),
            View::Feed(view) => tweets::feed(view),
            View::Compose => tweets::compose(),
            View::MyTweets(view) => tweets::my_tweets(view),
        }
    }
}

impl<'r> Responder<'r, 'static> for View {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        tracing::debug!(view = self.name(), "rendering view");
        RawHtml(self.render().into_string()).respond_to(req)
    }
}
