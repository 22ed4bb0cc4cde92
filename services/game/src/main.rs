use sea_orm::Database;
use tracing::info;

use qbm_game::config::GameConfig;
use qbm_game::infra::images::LocalImageStore;
use qbm_game::router::build_router;
use qbm_game::state::AppState;

#[tokio::main]
async fn main() {
    qbm_core::tracing::init_tracing();

    let config = GameConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        session_secret: config.session_secret,
        images: LocalImageStore {
            root: config.upload_dir.into(),
            base_url: config.upload_base_url,
        },
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.game_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("game service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
