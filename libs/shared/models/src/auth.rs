use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub exp: Option<u64>,
    pub name: Option<String>,
    pub role: Option<String>,
    pub iat: Option<u64>,
}

/// Identity consumed from an externally-issued bearer credential. The core
/// never mints or refreshes these; only `id` and `role` are trusted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: Option<String>,
    pub role: Option<String>,
}

impl User {
    /// Staff and admins may act on appointments they do not own.
    pub fn is_elevated(&self) -> bool {
        matches!(self.role.as_deref(), Some("admin") | Some("staff"))
    }
}
