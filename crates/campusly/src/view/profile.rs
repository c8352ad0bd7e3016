//! Profile view.

use campusly_api::Profile;
use campusly_core::forms::CommentDrafts;
use campusly_core::pages::ProfileView;
use iced::widget::{Space, button, column, container, row, text};
use iced::{Alignment, Background, Border, Element, Length};

use super::common::{BOLD, hint, load_state, maybe_error, page, title};
use super::post::view_posts;
use crate::message::{Message, Route};
use crate::style::widgets::{card_style, palette, primary_button_style, secondary_button_style};

/// Renders a profile card and the user's posts.
pub fn view_profile<'a>(view: &'a ProfileView, drafts: &'a CommentDrafts) -> Element<'a, Message> {
    let me = view.user.as_ref().map(|user| user.username.as_str());

    let Some(profile) = view.resource.as_ref() else {
        let state = load_state(view.loading, view.error.as_ref())
            .unwrap_or_else(|| hint("Profile not found."));
        return page(column![title("Profile"), state].spacing(16));
    };

    let own = me == Some(profile.username.as_str());
    let empty = if own {
        "You haven't posted anything yet."
    } else {
        "No posts yet."
    };

    page(
        column![
            view_card(profile, own),
            maybe_error(view.notice.as_deref()),
            view_posts(&view.list, me, drafts, empty),
        ]
        .spacing(16),
    )
}

fn view_card(profile: &Profile, own: bool) -> Element<'_, Message> {
    let p = palette::current();

    let action = if own {
        button(text("Edit profile").size(13))
            .padding([8, 16])
            .style(secondary_button_style)
            .on_press(Message::Navigate(Route::Settings))
    } else if profile.is_following {
        button(text("Unfollow").size(13))
            .padding([8, 16])
            .style(secondary_button_style)
            .on_press(Message::ToggleFollow)
    } else {
        button(text("Follow").size(13).font(BOLD))
            .padding([8, 16])
            .style(primary_button_style)
            .on_press(Message::ToggleFollow)
    };

    let counts = row![
        count(profile.follower_count, "followers"),
        count(profile.following_count, "following"),
    ]
    .spacing(20);

    let bio = match profile.bio.as_deref().filter(|bio| !bio.trim().is_empty()) {
        Some(bio) => text(bio).size(14).color(p.text_secondary),
        None => text("No bio yet.").size(14).color(p.text_muted),
    };

    let details = column![
        text(&profile.username).size(22).font(BOLD).color(p.text_primary),
        bio,
        counts,
    ]
    .spacing(6)
    .width(Length::Fill);

    let card = row![avatar(&profile.username), details, Space::new().width(8), action]
        .spacing(16)
        .align_y(Alignment::Center);

    container(card)
        .padding(20)
        .width(Length::Fill)
        .style(card_style)
        .into()
}

fn count(value: u32, label: &'static str) -> Element<'static, Message> {
    let p = palette::current();
    row![
        text(value.to_string()).size(15).font(BOLD).color(p.text_primary),
        text(label).size(13).color(p.text_secondary),
    ]
    .spacing(4)
    .align_y(Alignment::Center)
    .into()
}

/// Round badge with the user's initial.
fn avatar(username: &str) -> Element<'static, Message> {
    let initial = username
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    container(text(initial).size(24).font(BOLD))
        .center_x(56)
        .center_y(56)
        .style(|_theme| {
            let p = palette::current();
            container::Style {
                background: Some(Background::Color(p.selected)),
                text_color: Some(p.primary),
                border: Border {
                    radius: 28.0.into(),
                    ..Default::default()
                },
                ..Default::default()
            }
        })
        .into()
}
