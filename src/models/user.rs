use serde::{Deserialize, Serialize};

/// Profile mirrored into the users collection on first sign-in.
/// Identity itself is asserted by the external provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub username: String,
    pub created_at: String,
}
