use crate::error::app_error::AppError;
use crate::session::Session;
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::request::{FromRequest, Outcome as RequestOutcome, Request};
use serde::Serialize;

/// Guard for protected routes. Succeeds only when the session carries an
/// integer user id; never consults the store.
///
/// Anonymous requests fail with 401, which the catcher turns into a redirect
/// to `/`. Request guards run before the data guard, so the handler and its
/// form are never touched.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CurrentUser {
    pub id: i64,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for CurrentUser {
    type Error = AppError;

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, Self::Error> {
        let session = match req.guard::<Session>().await {
            Outcome::Success(session) => session,
            Outcome::Error(e) => return Outcome::Error(e),
            Outcome::Forward(status) => return Outcome::Forward(status),
        };

        match session.user_id() {
            Some(id) => {
                let current_user = CurrentUser { id };
                req.local_cache(|| Some(current_user));
                Outcome::Success(current_user)
            }
            None => Outcome::Error((Status::Unauthorized, AppError::Unauthenticated)),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::database::tweet::TweetRepository;
    use crate::test_utils::test_client;
    use rocket::http::{ContentType, Cookie, Status};

    const PROTECTED_GETS: [&str; 3] = ["/home", "/compose", "/my-tweets"];

    #[rocket::async_test]
    async fn anonymous_requests_are_redirected_to_landing() {
        let (client, _) = test_client().await;

        for path in PROTECTED_GETS {
            let response = client.get(path).dispatch().await;
            assert_eq!(response.status(), Status::SeeOther, "{path}");
            assert_eq!(response.headers().get_one("Location"), Some("/"), "{path}");
        }
    }

    #[rocket::async_test]
    async fn anonymous_posts_have_no_side_effects() {
        let (client, repo) = test_client().await;

        let response = client
            .post("/register")
            .header(ContentType::Form)
            .body("username=alice&password=secret")
            .dispatch()
            .await;
        assert_eq!(response.headers().get_one("Location"), Some("/home"));
        client
            .post("/tweets")
            .header(ContentType::Form)
            .body("tweet=keep-me")
            .dispatch()
            .await;
        let tweet_id = repo.list_feed().await.unwrap()[0].tweet.id;
        client.get("/logout").dispatch().await;

        let response = client
            .post("/tweets")
            .header(ContentType::Form)
            .body("tweet=hello")
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::SeeOther);
        assert_eq!(response.headers().get_one("Location"), Some("/"));

        let response = client
            .post("/tweets/delete")
            .header(ContentType::Form)
            .body(format!("id={tweet_id}"))
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::SeeOther);
        assert_eq!(response.headers().get_one("Location"), Some("/"));

        let feed = repo.list_feed().await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].tweet.text, "keep-me");
    }

    #[rocket::async_test]
    async fn tampered_cookie_is_a_server_error() {
        let (client, _) = test_client().await;

        let response = client.get("/home").cookie(Cookie::new("session", "forged-value")).dispatch().await;
        assert_eq!(response.status(), Status::InternalServerError);
    }
}
