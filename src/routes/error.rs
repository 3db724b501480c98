use rocket::response::Redirect;
use rocket::{Request, catch};

/// Failed auth guards land here; anonymous visitors are sent to the landing page.
#[catch(401)]
pub fn unauthenticated(_: &Request) -> Redirect {
    Redirect::to("/")
}

#[catch(404)]
pub fn not_found(_: &Request) -> &'static str {
    "Not found"
}

#[catch(422)]
pub fn unprocessable(_: &Request) -> &'static str {
    "Malformed form submission"
}

#[catch(500)]
pub fn internal_error(_: &Request) -> &'static str {
    "Internal server error"
}
