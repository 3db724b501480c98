mod auth;
mod config;
mod database;
mod db;
mod error;
mod middleware;
mod models;
mod routes;
mod session;
mod views;

#[cfg(test)]
pub mod test_utils;

pub use config::{Config, LoggingConfig};

#[cfg(test)]
use crate::database::postgres_repository::SharedRepository;
use crate::db::stage_db;
use crate::error::app_error::AppError;
use crate::middleware::RequestLogger;
use crate::routes as app_routes;
use crate::session::SessionStore;
use rocket::figment::Figment;
use rocket::fs::FileServer;
use rocket::{Build, Rocket, catchers};
use std::path::Path;
use tracing_subscriber::EnvFilter;

pub fn init_tracing(logging: &LoggingConfig) {
    // RUST_LOG takes precedence over the configured level, e.g.
    //   RUST_LOG=twittard::routes=debug,info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).with_target(true).with_line_number(true);

    if logging.json_format {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

fn rocket_figment(config: &Config) -> Result<Figment, AppError> {
    let figment = rocket::Config::figment()
        .merge(("address", config.server.address.clone()))
        .merge(("port", config.server.port));
    let profile = figment.profile().to_string();

    match &config.session.secret_key {
        Some(secret_key) => Ok(figment.merge(("secret_key", secret_key.clone()))),
        // Only enforce an explicit secret for non-debug profiles
        None if profile != "debug" => Err(AppError::ConfigurationError(format!(
            "session.secret_key is required for profile '{profile}'. Generate one with: openssl rand -base64 32"
        ))),
        None => {
            tracing::warn!("no session secret configured; cookies will not survive a restart");
            Ok(figment)
        }
    }
}

fn assemble(config: &Config) -> Result<Rocket<Build>, AppError> {
    let mut rocket = rocket::custom(rocket_figment(config)?)
        .attach(RequestLogger)
        .manage(SessionStore::new(&config.session))
        .mount("/", app_routes::auth::routes())
        .mount("/", app_routes::tweet::routes())
        .mount("/", app_routes::health::routes())
        .register(
            "/",
            catchers![
                app_routes::error::unauthenticated,
                app_routes::error::not_found,
                app_routes::error::unprocessable,
                app_routes::error::internal_error
            ],
        );

    let static_dir = Path::new(&config.server.static_dir);
    if static_dir.is_dir() {
        rocket = rocket.mount("/static", FileServer::from(static_dir));
    } else {
        tracing::warn!(dir = %static_dir.display(), "static directory not found; /static is not served");
    }

    Ok(rocket)
}

/// Production wiring: the repository is backed by a Postgres pool created at ignite.
pub fn build_rocket(config: Config) -> Result<Rocket<Build>, AppError> {
    Ok(assemble(&config)?.attach(stage_db(config.database)))
}

/// Wiring with a caller-supplied store.
#[cfg(test)]
pub(crate) fn build_rocket_with_repository(config: Config, repository: SharedRepository) -> Result<Rocket<Build>, AppError> {
    Ok(assemble(&config)?.manage(repository))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::random_secret_key;

    #[test]
    fn release_profile_without_secret_is_a_configuration_error() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ROCKET_PROFILE", "release");

            let err = build_rocket(Config::default()).err().expect("missing secret must be rejected");
            assert!(matches!(err, AppError::ConfigurationError(_)));
            assert!(err.to_string().contains("'release'"));
            Ok(())
        });
    }

    #[test]
    fn release_profile_accepts_configured_secret() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ROCKET_PROFILE", "release");

            let mut config = Config::default();
            config.session.secret_key = Some(random_secret_key());
            assert!(build_rocket(config).is_ok());
            Ok(())
        });
    }

    #[test]
    fn debug_profile_tolerates_missing_secret() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ROCKET_PROFILE", "debug");

            assert!(build_rocket(Config::default()).is_ok());
            Ok(())
        });
    }
}
