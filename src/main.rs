use anyhow::Result;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use messagely::{
    database,
    jwt::{JwtConfig, TokenService},
    password::{HashingConfig, PasswordService},
    repositories::{MessageRepository, UserRepository},
    routes, AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting messagely server");

    // Initialize database connection pool
    let db_config = database::DatabaseConfig::from_env()?;
    let pool = database::init_pool(&db_config).await?;

    if database::health_check(&pool).await? {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    database::run_migrations(&pool).await?;

    // Process-wide signing secret and hashing cost, injected at startup
    let jwt_config = JwtConfig::from_env()?;
    let token_service = TokenService::new(&jwt_config);

    let hashing_config = HashingConfig::from_env();
    let password_service = PasswordService::new(&hashing_config)?;

    let user_repository = UserRepository::new(pool.clone(), password_service);
    let message_repository = MessageRepository::new(pool.clone());

    let state = AppState {
        db_pool: pool,
        token_service,
        user_repository,
        message_repository,
    };

    let app = routes::create_router(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("messagely listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
