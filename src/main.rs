use std::net::SocketAddr;
use std::sync::Arc;

use dotenvy::dotenv;
use sqlx::sqlite::SqlitePoolOptions;

use sparkmatch::config::Config;
use sparkmatch::services::mailer::HttpMailer;
use sparkmatch::state::AppState;
use sparkmatch::web;

#[tokio::main]
async fn main() {
    // Load .env file
    dotenv().ok();

    // 1. Start logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("sparkmatch=info")),
        )
        .init();

    // 2. Connect to the database
    let config = Config::load();
    println!("Connecting to database: {}", config.database_url);

    let pool = SqlitePoolOptions::new()
        .connect(&config.database_url)
        .await
        .expect("Cannot connect to DB");

    sparkmatch::MIGRATOR
        .run(&pool)
        .await
        .expect("Migrations failed");

    // 3. Build shared state and the router
    let mailer = Arc::new(HttpMailer::new(&config));
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        mailer,
    };
    let app = web::router(state);

    // 4. Start the server (with fallback port)
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("Cannot parse host/port");

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!(
                "⚠️  Could not bind {}: {}. Trying fallback {}:{}",
                addr,
                e,
                config.host,
                config.port + 1
            );
            let fallback: SocketAddr = format!("{}:{}", config.host, config.port + 1)
                .parse()
                .expect("Cannot parse fallback");
            tokio::net::TcpListener::bind(fallback)
                .await
                .expect("Cannot bind fallback port")
        }
    };

    let bound_addr = listener.local_addr().expect("No local addr");
    println!("🚀 Server running on http://{}", bound_addr);

    axum::serve(listener, app).await.expect("Server failed");
}
