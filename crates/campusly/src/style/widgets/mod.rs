//! Widget styles with rounded corners and soft shadows.

#![allow(clippy::needless_update)] // Explicit struct updates for clarity

mod buttons;
mod containers;
mod inputs;
pub mod palette;
mod shadows;

pub use buttons::{
    danger_button_style, ghost_button_style, nav_button_selected_style, nav_button_style,
    primary_button_style, secondary_button_style,
};
pub use containers::{card_style, comment_style, header_style, modal_style, page_style};
pub use inputs::{input_style, scrollable_style};
