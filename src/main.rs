use twittard::{Config, build_rocket, init_tracing};

#[rocket::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging);
    tracing::info!(address = %config.server.address, port = config.server.port, "starting twittard");

    let rocket = match build_rocket(config) {
        Ok(rocket) => rocket,
        Err(e) => {
            tracing::error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };

    if let Err(e) = rocket.launch().await {
        tracing::error!(error = %e, "server terminated");
        std::process::exit(1);
    }
}
