//! Settings view.

use campusly_core::ThemeMode;
use campusly_core::pages::SettingsPage;
use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Element, Length};

use super::common::{BOLD, hint, labeled_input, maybe_error, page, title};
use crate::message::{Message, SettingsMessage};
use crate::style::widgets::{card_style, palette, primary_button_style, secondary_button_style};

/// Renders the profile editor and the appearance switch.
pub fn view_settings(state: &SettingsPage, theme: ThemeMode) -> Element<'_, Message> {
    let p = palette::current();

    let account: Element<'_, Message> = match &state.user {
        Some(user) => text(format!("Signed in as {}", user.username))
            .size(14)
            .color(p.text_secondary)
            .into(),
        None if state.loading => hint("Loading..."),
        None => Space::new().height(0).into(),
    };

    let save = button(
        text(if state.saving {
            "Saving..."
        } else {
            "Save changes"
        })
        .font(BOLD),
    )
    .padding([10, 20])
    .style(primary_button_style)
    .on_press_maybe(
        (!state.saving && state.user.is_some())
            .then_some(Message::Settings(SettingsMessage::Submit)),
    );

    let profile = column![
        text("Profile").size(18).font(BOLD).color(p.text_primary),
        account,
        labeled_input("Bio", "Tell your campus about yourself", &state.bio, |s| {
            Message::Settings(SettingsMessage::BioChanged(s))
        }),
        labeled_input(
            "New profile photo",
            "/path/to/photo.jpg",
            &state.photo_path,
            |s| Message::Settings(SettingsMessage::PhotoPathChanged(s)),
        ),
        maybe_error(state.error.as_deref()),
        save,
    ]
    .spacing(12);

    let (label, next) = match theme {
        ThemeMode::Light => ("Light", "Switch to dark"),
        ThemeMode::Dark => ("Dark", "Switch to light"),
    };
    let appearance = column![
        text("Appearance").size(18).font(BOLD).color(p.text_primary),
        row![
            text(format!("Theme: {label}")).size(14).color(p.text_secondary),
            Space::new().width(Length::Fill),
            button(text(next).size(13))
                .padding([8, 14])
                .style(secondary_button_style)
                .on_press(Message::ToggleTheme),
        ]
        .align_y(Alignment::Center),
    ]
    .spacing(12);

    page(
        column![
            title("Settings"),
            section(profile),
            section(appearance),
        ]
        .spacing(16),
    )
}

fn section<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    container(content)
        .padding(20)
        .width(Length::Fill)
        .style(card_style)
        .into()
}
