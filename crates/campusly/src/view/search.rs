//! User search view.

use campusly_api::UserSummary;
use campusly_core::pages::SearchPage;
use iced::widget::{Column, button, column, container, text, text_input};
use iced::{Element, Length};

use super::common::{BOLD, hint, load_state, page, title};
use crate::message::{Message, Route, SearchMessage};
use crate::style::widgets::{card_style, ghost_button_style, input_style, palette};

/// Renders the search box and results.
pub fn view_search(search: &SearchPage) -> Element<'_, Message> {
    let input = text_input("Search by username...", &search.query)
        .on_input(|s| Message::Search(SearchMessage::QueryChanged(s)))
        .padding(12)
        .size(16)
        .style(input_style);

    let results = if search.query.trim().is_empty() {
        hint("Find classmates by username.")
    } else if let Some(state) = load_state(search.loading, search.error.as_ref()) {
        state
    } else if search.results.is_empty() {
        hint("No users found.")
    } else {
        Column::with_children(search.results.iter().map(view_result))
            .spacing(8)
            .into()
    };

    page(column![title("Search"), input, results].spacing(16))
}

fn view_result(user: &UserSummary) -> Element<'_, Message> {
    let p = palette::current();

    let mut entry = column![
        button(text(&user.username).size(15).font(BOLD))
            .padding(0)
            .style(ghost_button_style)
            .on_press(Message::Navigate(Route::Profile(user.username.clone()))),
    ]
    .spacing(4);
    if let Some(bio) = user.bio.as_deref().filter(|bio| !bio.is_empty()) {
        entry = entry.push(text(bio).size(13).color(p.text_secondary));
    }

    container(entry)
        .padding([12, 16])
        .width(Length::Fill)
        .style(card_style)
        .into()
}
