pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use config::Config;
pub use error::ApiError;

use auth::jwt::JwtService;
use services::{DashboardService, OrderService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::SqlitePool,
    pub config: Config,
    pub jwt_service: JwtService,
    pub order_service: OrderService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(db: sqlx::SqlitePool, config: Config) -> Self {
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration);
        let order_service = OrderService::new(db.clone());
        let dashboard_service = DashboardService::new(db.clone());

        Self {
            db,
            config,
            jwt_service,
            order_service,
            dashboard_service,
        }
    }
}
