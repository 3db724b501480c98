use rocket::FromForm;
use validator::Validate;

/// The password column stays in the store; it is only ever compared in SQL.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, FromForm)]
pub struct LoginForm {
    #[field(default = String::new())]
    pub username: String,
    #[field(default = String::new())]
    pub password: String,
}

/// Missing fields fall back to the empty string so that the validator,
/// not the form parser, decides the response.
#[derive(Debug, FromForm, Validate)]
pub struct RegisterForm {
    #[field(default = String::new())]
    #[validate(length(min = 1, message = "username must not be empty"))]
    pub username: String,
    #[field(default = String::new())]
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_form_rejects_empty_fields() {
        let form = RegisterForm {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(form.validate().is_err());

        let form = RegisterForm {
            username: "alice".to_string(),
            password: String::new(),
        };
        assert!(form.validate().is_err());
    }

    #[test]
    fn register_form_accepts_filled_fields() {
        let form = RegisterForm {
            username: "alice".to_string(),
            password: "secret".to_string(),
        };
        assert!(form.validate().is_ok());
    }
}
