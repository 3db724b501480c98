use crate::config::SessionConfig;
use crate::error::app_error::AppError;
use rocket::http::{Cookie, CookieJar, SameSite, Status};
use rocket::outcome::Outcome;
use rocket::request::{FromRequest, Outcome as RequestOutcome, Request};
use serde_json::{Map, Value};

pub const USER_ID_KEY: &str = "user_id";

/// Reads and writes the session cookie. The payload is sealed with Rocket's
/// private cookie jar, so the key comes from the `secret_key` Rocket was configured with.
#[derive(Debug, Clone)]
pub struct SessionStore {
    cookie_name: String,
    secure: bool,
}

impl SessionStore {
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            cookie_name: config.cookie_name.clone(),
            secure: config.cookie_secure,
        }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Missing or empty cookies yield an empty session. A cookie that fails
    /// decryption is an error; one that decrypts to garbage is treated as empty.
    pub fn load(&self, cookies: &CookieJar<'_>) -> Result<Session, AppError> {
        match cookies.get(&self.cookie_name) {
            None => return Ok(Session::default()),
            Some(raw) if raw.value().is_empty() => return Ok(Session::default()),
            Some(_) => {}
        }

        let cookie = cookies.get_private(&self.cookie_name).ok_or(AppError::InvalidSession)?;
        Ok(Session::decode(cookie.value()))
    }

    /// Re-issues the cookie with the current payload, even when it is empty.
    pub fn save(&self, session: &Session, cookies: &CookieJar<'_>) -> Result<(), AppError> {
        let payload = session.encode()?;
        let cookie = Cookie::build((self.cookie_name.clone(), payload))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure)
            .build();
        cookies.add_private(cookie);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    values: Map<String, Value>,
}

impl Session {
    fn decode(payload: &str) -> Self {
        match serde_json::from_str::<Map<String, Value>>(payload) {
            Ok(values) => Self { values },
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable session payload");
                Self::default()
            }
        }
    }

    fn encode(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(&self.values)?)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The authenticated user, only if the stored value is an integer.
    pub fn user_id(&self) -> Option<i64> {
        self.get(USER_ID_KEY).and_then(Value::as_i64)
    }

    pub fn log_in(&mut self, user_id: i64) {
        self.insert(USER_ID_KEY, user_id);
    }

    pub fn log_out(&mut self) {
        self.remove(USER_ID_KEY);
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for Session {
    type Error = AppError;

    async fn from_request(req: &'r Request<'_>) -> RequestOutcome<Self, Self::Error> {
        let Some(store) = req.rocket().state::<SessionStore>() else {
            return Outcome::Error((Status::InternalServerError, AppError::InvalidSession));
        };

        match store.load(req.cookies()) {
            Ok(session) => Outcome::Success(session),
            Err(err) => {
                tracing::warn!(cookie = store.cookie_name(), "session cookie failed verification");
                Outcome::Error((Status::from(&err), err))
            }
        }
    }
}
