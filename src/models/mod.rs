//! Data models for CityScope entities.
//!
//! This module contains the data structures exchanged with the CityScope
//! backend:
//!
//! - `User` and the auth wire payloads
//! - `Contribution`, `GeoPoint`, `Category`: the shared map layer
//! - `ForumTopic`, `ForumMessage`: Agora discussions
//! - `RouteTheme`, `GeneratedRoute`: Échappées route generation

pub mod contribution;
pub mod forum;
pub mod route;
pub mod user;

/// Deserialize an id that the backend may send as either a JSON string or a
/// number, normalizing to a string.
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}

pub use contribution::{Author, Category, Contribution, GeoPoint, NewContribution};
pub use forum::{ForumMessage, ForumTopic, NewMessage, NewTopic};
pub use route::{GeneratedRoute, RoutePoint, RouteRequest, RouteTheme, StartLocation, ROUTE_THEMES};
pub use user::{
    AuthPayload, Credentials, ForgotPasswordResponse, NewAccount, ProfileUpdate, User,
    ValidateResponse, INTEREST_CATALOG,
};
