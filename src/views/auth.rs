use super::layout::{message, page};
use maud::{Markup, html};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginView {
    pub message: Option<String>,
}

impl LoginView {
    pub const INVALID_CREDENTIALS: &'static str = "Invalid username or password.";

    pub fn invalid_credentials() -> Self {
        Self {
            message: Some(Self::INVALID_CREDENTIALS.to_string()),
        }
    }
}

/// Reasons the registration form is shown again, carried as `?error=` on the redirect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterFlag {
    UsernameTaken,
}

impl RegisterFlag {
    pub fn as_query(self) -> &'static str {
        match self {
            RegisterFlag::UsernameTaken => "taken",
        }
    }

    pub fn from_query(value: &str) -> Option<Self> {
        match value {
            "taken" => Some(RegisterFlag::UsernameTaken),
            _ => None,
        }
    }

    fn message(self) -> &'static str {
        match self {
            RegisterFlag::UsernameTaken => "That username is already taken.",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterView {
    pub flag: Option<RegisterFlag>,
}

pub(super) fn login(view: &LoginView) -> Markup {
    page(
        "Log in",
        html! {
            h1 { "Log in" }
            (message(view.message.as_deref()))
            form method="post" action="/login" {
                label for="username" { "Username" }
                input id="username" type="text" name="username" required;
                label for="password" { "Password" }
                input id="password" type="password" name="password" required;
                button type="submit" { "Log in" }
            }
            p { "No account yet? " a href="/register" { "Register" } }
        },
    )
}

pub(super) fn register(view: &RegisterView) -> Markup {
    page(
        "Register",
        html! {
            h1 { "Register" }
            (message(view.flag.map(RegisterFlag::message)))
            form method="post" action="/register" {
                label for="username" { "Username" }
                input id="username" type="text" name="username" required;
                label for="password" { "Password" }
                input id="password" type="password" name="password" required;
                button type="submit" { "Create account" }
            }
            p { "Already registered? " a href="/" { "Log in" } }
        },
    )
}
