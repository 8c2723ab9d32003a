use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{Duration, Utc};
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;

use shared_models::auth::User;

pub struct TestUser {
    pub id: String,
    pub name: String,
    pub role: String,
}

impl TestUser {
    pub fn new(id: &str, name: &str, role: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
        }
    }

    pub fn patient(id: &str, name: &str) -> Self {
        Self::new(id, name, "patient")
    }

    pub fn admin(id: &str) -> Self {
        Self::new(id, "Admin", "admin")
    }

    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            name: Some(self.name.clone()),
            role: Some(self.role.clone()),
        }
    }
}

/// Mints an HS256 token the auth middleware will accept. Test-only helper;
/// the server itself never issues credentials.
pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
    let now = Utc::now();
    let exp = now + Duration::hours(exp_hours.unwrap_or(24));

    let header = json!({
        "alg": "HS256",
        "typ": "JWT"
    });

    let payload = json!({
        "sub": user.id,
        "name": user.name,
        "role": user.role,
        "iat": now.timestamp(),
        "exp": exp.timestamp()
    });

    let header_encoded = URL_SAFE_NO_PAD.encode(header.to_string());
    let payload_encoded = URL_SAFE_NO_PAD.encode(payload.to_string());

    let signing_input = format!("{}.{}", header_encoded, payload_encoded);

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes())
        .expect("HMAC can take key of any size");
    mac.update(signing_input.as_bytes());
    let signature = mac.finalize().into_bytes();
    let signature_encoded = URL_SAFE_NO_PAD.encode(signature);

    format!("{}.{}", signing_input, signature_encoded)
}

pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
    create_test_token(user, secret, Some(-1))
}
