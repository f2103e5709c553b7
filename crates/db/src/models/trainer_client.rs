//! Trainer-client assignment edge.

use liftdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `trainer_clients` table. Unique per (trainer, client).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TrainerClient {
    pub id: DbId,
    pub trainer_id: DbId,
    pub client_id: DbId,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for assigning a client to a trainer.
#[derive(Debug, Deserialize)]
pub struct CreateTrainerClient {
    pub client_id: DbId,
    pub notes: Option<String>,
}

/// DTO for updating assignment notes.
#[derive(Debug, Deserialize)]
pub struct UpdateTrainerClient {
    pub notes: Option<String>,
}
