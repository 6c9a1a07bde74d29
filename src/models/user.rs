use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,  // We store bcrypt hashes, never plain text
}

// The identity bound into the cookie session on login. Task operations take
// this explicitly instead of reaching into ambient session state.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SessionUser {
    pub id: i64,
    pub username: String,
}
