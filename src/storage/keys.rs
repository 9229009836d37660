//! Keys of the local store
//!
//! The names match the keys used by the browser build so an exported
//! store can be read by either.

/// User table: JSON array of stored user records
pub const USERS: &str = "legalis_users_db";

/// Session record: JSON object of the logged-in user
pub const SESSION: &str = "legalis_session_v1";

/// Analysis history: JSON array, newest first
pub const HISTORY: &str = "legalis_history_v1";
