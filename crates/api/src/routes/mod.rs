pub mod health;
pub mod schedules;

use axum::Router;

use crate::state::AppState;

/// Build the schedule route tree (mounted at the application root).
///
/// ```text
/// /schedules                       GET week view, POST recurring rule
/// /schedules/exceptions            POST override exception
/// /schedules/exceptions/{id}       PUT update times, DELETE remove
/// /schedules/{date}                DELETE cancel the date
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/schedules", schedules::router())
}
