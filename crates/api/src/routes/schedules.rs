//! Route definitions for the schedule API.
//!
//! The literal `/exceptions` segment is matched before the `/{date}`
//! parameter, so `DELETE /schedules/exceptions/7` deletes exception 7
//! while `DELETE /schedules/2025-10-06` cancels the date.

use axum::routing::{delete, get, post};
use axum::Router;

use crate::handlers::schedules;
use crate::state::AppState;

/// Schedule routes mounted at `/schedules`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(schedules::get_week).post(schedules::create_recurring),
        )
        .route("/exceptions", post(schedules::create_exception))
        .route(
            "/exceptions/{id}",
            delete(schedules::delete_exception).put(schedules::update_exception),
        )
        .route("/{date}", delete(schedules::cancel_date))
}
