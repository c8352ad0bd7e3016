//! Fetch / mutate / refetch contract shared by every page.
//!
//! A page is a [`Resource`] implementation; [`SyncedView`] owns its state
//! and applies results. Loads and mutations are split into a synchronous
//! `begin`, an async fetch that can run on any executor, and a synchronous
//! `apply`, so the UI event loop stays the single writer.

mod error;
mod resource;
mod scope;
mod view;

pub use error::ViewError;
pub use resource::Resource;
pub use scope::ViewScope;
pub use view::{
    LoadEffect, LoadTicket, Loaded, MutationEffect, MutationTicket, Mutated, Snapshot, SyncedView,
    fetch, perform,
};
