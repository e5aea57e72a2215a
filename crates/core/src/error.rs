use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A spot status transition that the state machine forbids.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("No available spot in lot {lot_id}")]
    NoAvailableSpot { lot_id: DbId },

    #[error("Reservation {reservation_id} is already closed")]
    AlreadyClosed { reservation_id: DbId },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
