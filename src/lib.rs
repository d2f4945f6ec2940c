//! CityScope terminal client.
//!
//! A keyboard-driven interface for the CityScope civic urban-exploration
//! platform: browse and add geotagged contributions, discuss in the Agora,
//! generate themed walking routes, and manage your profile.
//!
//! The crate's core is the session lifecycle: `auth::SessionStore` owns the
//! current user and the persisted bearer token, `api::ApiClient` stamps
//! every request and centralizes 401 handling, and `ui::guard` derives
//! screen access from session state.

pub mod api;
pub mod app;
pub mod auth;
pub mod config;
pub mod models;
pub mod ui;
pub mod utils;
