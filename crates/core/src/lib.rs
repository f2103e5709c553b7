//! Domain core for the liftdesk workspace.
//!
//! Pure types and logic shared by the database and API layers: the error
//! taxonomy, id/timestamp aliases, role constants, the client-onboarding
//! wizard state machine, and the optimistic plan-editor reconciliation log.
//! No I/O happens in this crate.

pub mod editor;
pub mod error;
pub mod roles;
pub mod types;
pub mod wizard;
