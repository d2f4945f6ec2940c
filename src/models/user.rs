use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A platform user as returned by the backend.
///
/// The profile screen edits a subset of these fields; the record is always
/// replaced wholesale with whatever the backend returns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id", deserialize_with = "super::flexible_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl User {
    pub fn display_location(&self) -> &str {
        self.location.as_deref().unwrap_or("Rabat")
    }

    pub fn display_bio(&self) -> &str {
        self.bio.as_deref().unwrap_or("No bio available")
    }
}

/// Login request body for `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Registration request body for `POST /auth/register`
#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Profile update body for `PUT /profiles`. Only present fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interests: Option<Vec<String>>,
}

/// Interest areas offered on the profile screen
pub const INTEREST_CATALOG: &[(&str, &str)] = &[
    ("urban-planning", "Urban Planning"),
    ("architecture", "Architecture"),
    ("sustainability", "Sustainability"),
    ("local-culture", "Local Culture"),
    ("community-development", "Community Development"),
    ("transportation", "Transportation"),
    ("environment", "Environment"),
    ("heritage", "Heritage Preservation"),
];

// Auth wire payloads

/// Response from `POST /auth/login` and `POST /auth/register`
#[derive(Debug, Clone, Deserialize)]
pub struct AuthPayload {
    pub token: String,
    pub user: User,
}

/// Response from `GET /auth/validate`
#[derive(Debug, Clone, Deserialize)]
pub struct ValidateResponse {
    pub user: User,
}

/// Response from `POST /auth/forgot-password`
#[derive(Debug, Clone, Deserialize)]
pub struct ForgotPasswordResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_with_mongo_id() {
        let json = r#"{"_id":"64ab12","name":"Amal","email":"amal@example.com"}"#;
        let user: User = serde_json::from_str(json).expect("user should parse");
        assert_eq!(user.id, "64ab12");
        assert_eq!(user.name, "Amal");
        assert!(user.bio.is_none());
        assert!(user.interests.is_empty());
    }

    #[test]
    fn test_parse_user_with_numeric_id() {
        let json = r#"{"id":1,"name":"Amal","email":"a@b.com"}"#;
        let user: User = serde_json::from_str(json).expect("user should parse");
        assert_eq!(user.id, "1");
    }

    #[test]
    fn test_parse_auth_payload() {
        let json = r#"{"token":"tok-123","user":{"id":"1","name":"Amal","email":"a@b.com"}}"#;
        let payload: AuthPayload = serde_json::from_str(json).expect("payload should parse");
        assert_eq!(payload.token, "tok-123");
        assert_eq!(payload.user.name, "Amal");
    }

    #[test]
    fn test_profile_update_skips_absent_fields() {
        let update = ProfileUpdate {
            bio: Some("Exploring the medina".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_string(&update).expect("update should serialize");
        assert_eq!(json, r#"{"bio":"Exploring the medina"}"#);
    }
}
