//! Endpoint methods on [`crate::ApiClient`], grouped by resource.

mod auth;
mod groups;
mod posts;
mod users;
