//! Header bar with page buttons.

use campusly_core::pages::ME;
use iced::widget::{Space, button, container, row, text};
use iced::{Alignment, Element, Length};

use super::common::BOLD;
use crate::message::{Message, Route};
use crate::style::widgets::{
    header_style, nav_button_selected_style, nav_button_style, palette, primary_button_style,
    secondary_button_style,
};

/// Renders the header for signed-in pages.
pub fn view_header(route: &Route) -> Element<'static, Message> {
    let p = palette::current();

    let brand = text("Campusly").size(22).font(BOLD).color(p.primary);

    let nav = row![
        nav_button("Home", Route::Feed, route),
        nav_button("Groups", Route::Groups, route),
        nav_button("Search", Route::Search, route),
        nav_button("Profile", Route::Profile(ME.to_string()), route),
        nav_button("Settings", Route::Settings, route),
    ]
    .spacing(4);

    let new_post = button(text("New post").font(BOLD))
        .padding([8, 16])
        .style(primary_button_style)
        .on_press(Message::Navigate(Route::CreatePost));

    let logout = button(text("Log out").size(14))
        .padding([8, 14])
        .style(secondary_button_style)
        .on_press(Message::Logout);

    let content = row![
        brand,
        Space::new().width(24),
        nav,
        Space::new().width(Length::Fill),
        new_post,
        logout,
    ]
    .spacing(8)
    .padding([12, 20])
    .align_y(Alignment::Center);

    container(content)
        .width(Length::Fill)
        .style(header_style)
        .into()
}

fn nav_button(label: &'static str, target: Route, current: &Route) -> Element<'static, Message> {
    let selected = is_section(&target, current);
    button(text(label).size(14))
        .padding([6, 14])
        .style(if selected {
            nav_button_selected_style
        } else {
            nav_button_style
        })
        .on_press(Message::Navigate(target))
        .into()
}

/// Whether `current` belongs to the header section `target`.
fn is_section(target: &Route, current: &Route) -> bool {
    match (target, current) {
        (Route::Groups, Route::Group(_)) => true,
        (Route::Profile(_), Route::Profile(username)) => username == ME,
        _ => target == current,
    }
}
