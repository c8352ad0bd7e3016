//! View components for the application.

mod auth;
mod common;
mod create_post;
mod feed;
mod groups;
mod header;
mod modals;
mod post;
mod profile;
mod search;
mod settings;

pub use auth::{view_login, view_register};
pub use create_post::view_create_post;
pub use feed::view_feed;
pub use groups::{view_group, view_groups};
pub use header::view_header;
pub use modals::{view_add_member, view_confirm_delete, view_create_group, view_edit_post};
pub use profile::view_profile;
pub use search::view_search;
pub use settings::view_settings;
