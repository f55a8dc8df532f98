mod api;
mod banner;
mod compiler;
mod config;
mod errors;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use api::{AppState, configure_routes};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Print the startup banner
    banner::print_banner();

    // Load .env file - optional, env vars may be set directly
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("⚠️  Warning: Could not load .env file: {}", e);
    }

    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let app_config = config::AppConfig::from_env()
        .expect("Failed to load app configuration from environment");

    let port = app_config.port;
    println!("📁 Scratch root: {}", app_config.compiler.scratch_root.display());
    println!("🖨️  Engine: {} (budget {}s)", app_config.compiler.engine_bin, app_config.compiler.timeout.as_secs());

    let state = AppState::new(app_config);

    println!("🚀 Starting server...");
    println!("📄 API available at http://127.0.0.1:{}/latex/api/v1", port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
