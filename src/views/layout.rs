use maud::{DOCTYPE, Markup, html};

pub(super) fn page(title: &str, body: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) " · Twittard" }
                link rel="stylesheet" href="/static/style.css";
            }
            body {
                (body)
            }
        }
    }
}

pub(super) fn nav() -> Markup {
    html! {
        nav {
            a href="/home" { "Home" }
            a href="/compose" { "New tweet" }
            a href="/my-tweets" { "My tweets" }
            a href="/logout" { "Log out" }
        }
    }
}

pub(super) fn message(text: Option<&str>) -> Markup {
    html! {
        @if let Some(text) = text {
            p class="message" { (text) }
        }
    }
}
