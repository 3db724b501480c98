use crate::database::postgres_repository::SharedRepository;
use crate::database::user::UserRepository;
use crate::error::app_error::AppError;
use crate::models::user::{LoginForm, RegisterForm};
use crate::session::{Session, SessionStore};
use crate::views::{LoginView, RegisterFlag, RegisterView, View};
use rocket::form::Form;
use rocket::http::CookieJar;
use rocket::response::Redirect;
use rocket::{State, routes};
use tracing::info;
use validator::Validate;

#[rocket::get("/")]
pub fn landing() -> View {
    View::Login(LoginView::default())
}

#[rocket::get("/login")]
pub fn login_page() -> View {
    View::Login(LoginView::default())
}

#[derive(rocket::Responder)]
pub enum LoginOutcome {
    LoggedIn(Redirect),
    Rejected(View),
}

/// Unknown usernames and wrong passwords produce the same view.
#[rocket::post("/login", data = "<form>")]
pub async fn login(
    repo: &State<SharedRepository>,
    sessions: &State<SessionStore>,
    cookies: &CookieJar<'_>,
    mut session: Session,
    form: Form<LoginForm>,
) -> Result<LoginOutcome, AppError> {
    let Some(user) = repo.find_user_by_credentials(&form.username, &form.password).await? else {
        info!(username = %form.username, "login failed");
        return Ok(LoginOutcome::Rejected(View::Login(LoginView::invalid_credentials())));
    };

    session.log_in(user.id);
    sessions.save(&session, cookies)?;
    info!(user_id = user.id, "user logged in");

    Ok(LoginOutcome::LoggedIn(Redirect::to("/home")))
}

#[rocket::get("/register?<error>")]
pub fn register_page(error: Option<&str>) -> View {
    View::Register(RegisterView {
        flag: error.and_then(RegisterFlag::from_query),
    })
}

/// The pre-check keeps the common case cheap; the unique index settles races,
/// and both paths end in the same redirect.
#[rocket::post("/register", data = "<form>")]
pub async fn register(
    repo: &State<SharedRepository>,
    sessions: &State<SessionStore>,
    cookies: &CookieJar<'_>,
    mut session: Session,
    form: Form<RegisterForm>,
) -> Result<Redirect, AppError> {
    form.validate()?;

    let taken = Redirect::to(format!("/register?error={}", RegisterFlag::UsernameTaken.as_query()));

    if repo.username_exists(&form.username).await? {
        return Ok(taken);
    }

    let user = match repo.create_user(&form.username, &form.password).await {
        Ok(user) => user,
        Err(AppError::UsernameTaken(username)) => {
            info!(username = %username, "registration lost a race for the username");
            return Ok(taken);
        }
        Err(e) => return Err(e),
    };

    session.log_in(user.id);
    sessions.save(&session, cookies)?;
    info!(user_id = user.id, "user registered");

    Ok(Redirect::to("/home"))
}

/// Clears the identity but re-issues the (now empty) cookie.
#[rocket::get("/logout")]
pub fn logout(sessions: &State<SessionStore>, cookies: &CookieJar<'_>, mut session: Session) -> Result<Redirect, AppError> {
    if let Some(user_id) = session.user_id() {
        info!(user_id, "user logged out");
    }
    session.log_out();
    sessions.save(&session, cookies)?;
    Ok(Redirect::to("/"))
}

#[rocket::post("/logout")]
pub fn post_logout(sessions: &State<SessionStore>, cookies: &CookieJar<'_>, session: Session) -> Result<Redirect, AppError> {
    logout(sessions, cookies, session)
}

pub fn routes() -> Vec<rocket::Route> {
    routes![landing, login_page, login, register_page, register, logout, post_logout]
}
