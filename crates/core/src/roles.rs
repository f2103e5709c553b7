//! Well-known role name constants.
//!
//! These must match the seed data in the `create_users_table` migration.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_TRAINER: &str = "trainer";
pub const ROLE_MEMBER: &str = "member";

/// All roles accepted at registration / invite time.
pub const ALL_ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_TRAINER, ROLE_MEMBER];

/// Check whether a string names a known role.
pub fn is_known_role(role: &str) -> bool {
    ALL_ROLES.contains(&role)
}
