//! Modal dialogs drawn over a scrim.

use campusly_api::UserSummary;
use campusly_core::forms::{AddMemberModal, CreateGroupModal, EditPostModal};
use iced::widget::{Column, Space, button, column, container, row, text, text_input};
use iced::{Alignment, Background, Element, Length};

use super::common::{BOLD, hint, labeled_input, maybe_error};
use crate::message::{AddMemberMessage, CreateGroupMessage, Message, PostMessage};
use crate::style::widgets::{
    danger_button_style, input_style, modal_style, palette, primary_button_style,
    secondary_button_style,
};

/// Asks before deleting a post.
pub fn view_confirm_delete() -> Element<'static, Message> {
    let p = palette::current();

    let content = column![
        text("Delete post?").size(20).font(BOLD).color(p.text_primary),
        hint("This can't be undone."),
        row![
            Space::new().width(Length::Fill),
            cancel(Message::Post(PostMessage::DeleteCancel)),
            button(text("Delete").size(14))
                .padding([10, 20])
                .style(danger_button_style)
                .on_press(Message::Post(PostMessage::DeleteConfirm)),
        ]
        .spacing(8),
    ]
    .spacing(14);

    overlay(content)
}

/// Edits a post's text.
pub fn view_edit_post(modal: &EditPostModal) -> Element<'_, Message> {
    let p = palette::current();

    let content = column![
        text("Edit post").size(20).font(BOLD).color(p.text_primary),
        text_input("Post content", &modal.content)
            .on_input(|s| Message::Post(PostMessage::EditChanged(s)))
            .on_submit(Message::Post(PostMessage::EditSubmit))
            .padding(12)
            .style(input_style),
        maybe_error(modal.error.as_deref()),
        row![
            Space::new().width(Length::Fill),
            cancel(Message::Post(PostMessage::EditCancel)),
            confirm(
                if modal.saving { "Saving..." } else { "Save" },
                (!modal.saving).then_some(Message::Post(PostMessage::EditSubmit)),
            ),
        ]
        .spacing(8),
    ]
    .spacing(14);

    overlay(content)
}

/// Creates a group.
pub fn view_create_group(modal: &CreateGroupModal) -> Element<'_, Message> {
    let p = palette::current();

    let content = column![
        text("Create group").size(20).font(BOLD).color(p.text_primary),
        labeled_input("Name", "Robotics Club", &modal.name, |s| {
            Message::CreateGroup(CreateGroupMessage::NameChanged(s))
        }),
        labeled_input(
            "Description",
            "What is this group about?",
            &modal.description,
            |s| Message::CreateGroup(CreateGroupMessage::DescriptionChanged(s)),
        ),
        maybe_error(modal.error.as_deref()),
        row![
            Space::new().width(Length::Fill),
            cancel(Message::CreateGroup(CreateGroupMessage::Cancel)),
            confirm(
                if modal.submitting {
                    "Creating..."
                } else {
                    "Create"
                },
                (!modal.submitting).then_some(Message::CreateGroup(CreateGroupMessage::Submit)),
            ),
        ]
        .spacing(8),
    ]
    .spacing(14);

    overlay(content)
}

/// Searches users and adds them to the open group.
pub fn view_add_member(modal: &AddMemberModal) -> Element<'_, Message> {
    let p = palette::current();

    let results: Element<'_, Message> = if modal.query.trim().is_empty() {
        hint("Search by username to add people.")
    } else if modal.results.is_empty() {
        hint("No users found.")
    } else {
        Column::with_children(modal.results.iter().map(|user| view_candidate(modal, user)))
            .spacing(6)
            .into()
    };

    let content = column![
        text("Add member").size(20).font(BOLD).color(p.text_primary),
        text_input("Search users...", &modal.query)
            .on_input(|s| Message::AddMember(AddMemberMessage::QueryChanged(s)))
            .padding(10)
            .style(input_style),
        results,
        maybe_error(modal.error.as_deref()),
        row![
            Space::new().width(Length::Fill),
            cancel(Message::AddMember(AddMemberMessage::Close)),
        ],
    ]
    .spacing(14);

    overlay(content)
}

fn view_candidate<'a>(modal: &AddMemberModal, user: &'a UserSummary) -> Element<'a, Message> {
    let p = palette::current();

    let action = if modal.added.contains(&user.id) {
        button(text("Added").size(13)).padding([6, 14]).style(secondary_button_style)
    } else if modal.adding == Some(user.id) {
        button(text("Adding...").size(13)).padding([6, 14]).style(primary_button_style)
    } else {
        button(text("Add").size(13))
            .padding([6, 14])
            .style(primary_button_style)
            .on_press_maybe(
                modal
                    .adding
                    .is_none()
                    .then(|| Message::AddMember(AddMemberMessage::Add(user.clone()))),
            )
    };

    row![
        text(&user.username).size(14).color(p.text_primary),
        Space::new().width(Length::Fill),
        action,
    ]
    .align_y(Alignment::Center)
    .into()
}

fn cancel(message: Message) -> Element<'static, Message> {
    button(text("Cancel").size(14))
        .padding([10, 20])
        .style(secondary_button_style)
        .on_press(message)
        .into()
}

fn confirm(label: &'static str, message: Option<Message>) -> Element<'static, Message> {
    button(text(label).size(14).font(BOLD))
        .padding([10, 20])
        .style(primary_button_style)
        .on_press_maybe(message)
        .into()
}

/// Centers a dialog panel on a dimmed backdrop.
fn overlay<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    let panel = container(content)
        .max_width(480.0)
        .padding(24)
        .style(modal_style);

    container(panel)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(|_theme| {
            let p = palette::current();
            container::Style {
                background: Some(Background::Color(p.scrim)),
                ..Default::default()
            }
        })
        .into()
}
