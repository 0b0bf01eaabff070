use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vocab_notebook::config::Config;
use vocab_notebook::handlers::{self, AppState};
use vocab_notebook::quiz::model::ModelClient;
use vocab_notebook::db;

#[tokio::main]
async fn main() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "vocab_notebook=debug,tower_http=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  let config = Config::load().unwrap_or_else(|e| panic!("Configuration error: {}", e));

  let pool = db::init_db(&config.database_path).expect("Failed to initialize database");

  let model = ModelClient::new(
    config.model_token.clone(),
    config.model_endpoint.clone(),
    config.model_id.clone(),
  );

  let app = handlers::router(AppState { pool, model });

  let bind_addr = config.bind_addr();
  let listener = tokio::net::TcpListener::bind(&bind_addr)
    .await
    .unwrap_or_else(|_| panic!("Failed to bind to {}", bind_addr));

  tracing::info!("Server running on http://localhost:{}", config.port);

  axum::serve(listener, app)
    .await
    .expect("Server failed to start");
}
