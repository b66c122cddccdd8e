use weekplan_core::types::DbId;

/// Errors surfaced by the repository write paths.
///
/// Capacity and not-found are distinguishable so the API layer can map
/// them to specific status codes instead of a generic 500. `Transaction`
/// marks a failure inside the cancel transaction; sqlx rolls the
/// transaction back when it is dropped without commit, so the store is
/// guaranteed unchanged whenever this variant is returned.
#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    /// A business-rule limit (max 2 slots per weekday / per date) was hit.
    #[error("{0}")]
    Capacity(String),

    /// The targeted exception row does not exist.
    #[error("Schedule exception with id {id} not found")]
    NotFound { id: DbId },

    /// The cancel transaction failed and was rolled back.
    #[error("Cancel transaction failed: {0}")]
    Transaction(#[source] sqlx::Error),

    /// Any other storage failure.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}
