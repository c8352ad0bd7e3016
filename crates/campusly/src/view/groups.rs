//! Groups index and group detail views.

use campusly_api::Group;
use campusly_core::forms::CommentDrafts;
use campusly_core::pages::{GroupView, GroupsView};
use iced::widget::{Column, Row, Space, button, column, container, row, text};
use iced::{Alignment, Element, Length};

use super::common::{BOLD, hint, load_state, maybe_error, page, title};
use super::post::view_posts;
use crate::message::{AddMemberMessage, CreateGroupMessage, Message, Route};
use crate::style::widgets::{
    card_style, danger_button_style, ghost_button_style, nav_button_style, palette,
    primary_button_style, secondary_button_style,
};

/// Renders every group, with the user's own groups first.
pub fn view_groups(groups: &GroupsView) -> Element<'_, Message> {
    let p = palette::current();

    let heading = row![
        title("Groups"),
        Space::new().width(Length::Fill),
        button(text("Create group").font(BOLD))
            .padding([8, 16])
            .style(primary_button_style)
            .on_press(Message::CreateGroup(CreateGroupMessage::Open)),
    ]
    .align_y(Alignment::Center);

    let mut content = column![heading, maybe_error(groups.notice.as_deref())]
        .spacing(16)
        .width(Length::Fill);

    let waiting = groups.loading && groups.list.is_empty();
    if let Some(state) = load_state(waiting, groups.error.as_ref()) {
        return page(content.push(state));
    }

    if let Some(mine) = groups.resource.as_ref().filter(|mine| !mine.is_empty()) {
        let chips = Row::with_children(mine.iter().map(|group| {
            button(text(&group.name).size(13))
                .padding([6, 12])
                .style(nav_button_style)
                .on_press(Message::Navigate(Route::Group(group.id.to_string())))
                .into()
        }))
        .spacing(6)
        .wrap();
        content = content.push(
            column![text("My groups").size(12).color(p.text_secondary), chips].spacing(6),
        );
    }

    content = content.push(text("All groups").size(12).color(p.text_secondary));
    content = if groups.list.is_empty() {
        content.push(hint("No groups yet. Create the first one!"))
    } else {
        content.push(Column::with_children(groups.list.iter().map(view_group_card)).spacing(12))
    };

    page(content)
}

fn view_group_card(group: &Group) -> Element<'_, Message> {
    let p = palette::current();

    let name = button(text(&group.name).size(17).font(BOLD))
        .padding(0)
        .style(ghost_button_style)
        .on_press(Message::Navigate(Route::Group(group.id.to_string())));

    let mut details = column![name].spacing(4).width(Length::Fill);
    if let Some(description) = group.description.as_deref().filter(|d| !d.is_empty()) {
        details = details.push(text(description).size(13).color(p.text_secondary));
    }
    details = details.push(text(members_label(group)).size(12).color(p.text_muted));

    let card = row![details, membership_button(group)]
        .spacing(12)
        .align_y(Alignment::Center);

    container(card)
        .padding(16)
        .width(Length::Fill)
        .style(card_style)
        .into()
}

/// Renders one group and its posts.
pub fn view_group<'a>(view: &'a GroupView, drafts: &'a CommentDrafts) -> Element<'a, Message> {
    let p = palette::current();
    let me = view.user.as_ref().map(|user| user.username.as_str());

    let Some(group) = view.resource.as_ref() else {
        let state = load_state(view.loading, view.error.as_ref())
            .unwrap_or_else(|| hint("Group not found."));
        return page(column![title("Group"), state].spacing(16));
    };

    let mut actions = row![membership_button(group)].spacing(8);
    if me.is_some_and(|me| group.is_owned_by(me)) {
        actions = actions.push(
            button(text("Add member").size(13))
                .padding([8, 14])
                .style(secondary_button_style)
                .on_press(Message::AddMember(AddMemberMessage::Open(group.id))),
        );
    }
    if group.is_member {
        actions = actions.push(
            button(text("Post here").size(13))
                .padding([8, 14])
                .style(secondary_button_style)
                .on_press(Message::Navigate(Route::CreatePost)),
        );
    }

    let mut summary = column![title(&group.name)].spacing(6);
    if let Some(description) = group.description.as_deref().filter(|d| !d.is_empty()) {
        summary = summary.push(text(description).size(14).color(p.text_secondary));
    }
    summary = summary
        .push(
            text(format!("{} · owned by {}", members_label(group), group.owner_username))
                .size(12)
                .color(p.text_muted),
        )
        .push(actions);

    let posts = if group.is_member {
        view_posts(&view.list, me, drafts, "No posts in this group yet.")
    } else {
        hint("Join this group to see its posts.")
    };

    page(
        column![
            container(summary).padding(20).width(Length::Fill).style(card_style),
            maybe_error(view.notice.as_deref()),
            posts,
        ]
        .spacing(16),
    )
}

fn membership_button(group: &Group) -> Element<'_, Message> {
    let label = if group.is_member { "Leave" } else { "Join" };
    button(text(label).size(13))
        .padding([8, 16])
        .style(if group.is_member {
            danger_button_style
        } else {
            primary_button_style
        })
        .on_press(Message::ToggleMembership(group.id))
        .into()
}

fn members_label(group: &Group) -> String {
    match group.member_count {
        1 => "1 member".to_string(),
        n => format!("{n} members"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_label_pluralizes() {
        let mut group = sample_group();
        group.member_count = 1;
        assert_eq!(members_label(&group), "1 member");
        group.member_count = 0;
        assert_eq!(members_label(&group), "0 members");
    }

    fn sample_group() -> Group {
        Group {
            id: campusly_api::GroupId::new(1),
            name: "Robotics".into(),
            description: None,
            member_count: 0,
            owner: None,
            owner_username: "asha".into(),
            is_member: false,
            created_at: None,
        }
    }
}
