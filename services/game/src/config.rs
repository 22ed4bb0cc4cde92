/// Game service configuration loaded from environment variables.
#[derive(Debug)]
pub struct GameConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `GAME_PORT`.
    pub game_port: u16,
    /// HS256 key the authentication provider signs session tokens with.
    pub session_secret: String,
    /// Directory uploaded images are written to (default "uploads").
    pub upload_dir: String,
    /// Public URL prefix for uploaded images (default "/uploads").
    pub upload_base_url: String,
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            game_port: std::env::var("GAME_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            session_secret: std::env::var("SESSION_SECRET").expect("SESSION_SECRET"),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_owned()),
            upload_base_url: std::env::var("UPLOAD_BASE_URL")
                .unwrap_or_else(|_| "/uploads".to_owned()),
        }
    }
}
