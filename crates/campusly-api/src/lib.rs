//! # campusly-api
//!
//! Typed async client for the Campusly college social network REST API.
//!
//! ## Features
//!
//! - JWT sign-in with a single transparent refresh on `401`
//! - Closed error classification ([`ErrorKind`]) with field-level messages
//! - Two-step registration with an emailed one-time code
//! - Multipart profile photo upload
//!
//! ## Example
//!
//! ```ignore
//! use campusly_api::{ApiClient, Session};
//!
//! let api = ApiClient::new("http://localhost:8000/api", Session::new())?;
//! api.login("ada@college.ac.in", "hunter2").await?;
//! for post in api.feed().await? {
//!     println!("{}: {}", post.author_username, post.content);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod api;
mod client;
mod endpoints;
mod error;
pub mod model;
pub mod session;

pub use api::SocialApi;
pub use client::{ApiClient, DEFAULT_TIMEOUT, RefreshHook};
pub use error::{Error, ErrorKind, FieldErrors, NON_FIELD_ERRORS, Result};
pub use model::{
    Acknowledgement, Comment, CommentId, CurrentUser, Group, GroupId, MembershipChange, NewGroup,
    NewPost, PhotoUpload, Post, PostFilter, PostId, Profile, ProfileUpdate, UserId, UserSummary,
};
pub use session::{Credential, Session};
