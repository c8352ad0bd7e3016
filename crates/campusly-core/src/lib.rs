//! # campusly-core
//!
//! Client-side state for the Campusly desktop app.
//!
//! This crate provides:
//! - The fetch / mutate / refetch contract shared by every page ([`sync`])
//! - Page view-state containers ([`pages`])
//! - Modal and inline form state machines ([`forms`])
//! - Timer-based debounce for search inputs
//! - Configuration and keyring-backed session persistence

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod config;
pub mod credentials;
mod debounce;
mod error;
pub mod forms;
pub mod pages;
pub mod sync;
pub mod time;

pub use config::{Config, ThemeMode};
pub use credentials::{CredentialError, CredentialResult};
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use error::{Error, Result};
pub use sync::{
    LoadEffect, LoadTicket, Loaded, MutationEffect, Mutated, Resource, SyncedView, ViewError,
    ViewScope,
};
