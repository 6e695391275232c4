pub mod dashboard;
pub mod orders;

pub use dashboard::{DashboardService, DashboardStats, LOW_STOCK_THRESHOLD};
pub use orders::OrderService;
