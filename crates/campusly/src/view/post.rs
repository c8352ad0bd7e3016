//! Post card with embedded comments and a composer.

use campusly_api::{Comment, Post};
use campusly_core::forms::CommentDrafts;
use campusly_core::time;
use chrono::Utc;
use iced::widget::{Column, Space, button, column, container, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::common::{BOLD, maybe_error};
use crate::message::{Message, PostMessage, Route};
use crate::style::widgets::{
    card_style, comment_style, danger_button_style, ghost_button_style, input_style, palette,
    secondary_button_style,
};

/// Renders a list of posts, or `empty` when there are none.
pub fn view_posts<'a>(
    posts: &'a [Post],
    me: Option<&'a str>,
    drafts: &'a CommentDrafts,
    empty: &'a str,
) -> Element<'a, Message> {
    if posts.is_empty() {
        let p = palette::current();
        return text(empty).size(14).color(p.text_muted).into();
    }
    Column::with_children(posts.iter().map(|post| view_post(post, me, drafts)))
        .spacing(16)
        .into()
}

/// Renders one post card.
pub fn view_post<'a>(
    post: &'a Post,
    me: Option<&'a str>,
    drafts: &'a CommentDrafts,
) -> Element<'a, Message> {
    let p = palette::current();
    let now = Utc::now();

    let author = button(text(&post.author_username).font(BOLD).size(15))
        .padding(0)
        .style(ghost_button_style)
        .on_press(Message::Navigate(Route::Profile(post.author_username.clone())));

    let mut stamp = time::relative(post.created_at, now);
    if post.updated_at.is_some_and(|at| at > post.created_at) {
        stamp.push_str(" (edited)");
    }

    let mut header = row![author, text(stamp).size(12).color(p.text_muted)]
        .spacing(10)
        .align_y(Alignment::Center);

    if let Some(group) = post.group {
        header = header.push(
            button(text("in group").size(12))
                .padding([2, 6])
                .style(ghost_button_style)
                .on_press(Message::Navigate(Route::Group(group.to_string()))),
        );
    }

    if me.is_some_and(|me| post.is_authored_by(me)) {
        header = header
            .push(Space::new().width(Length::Fill))
            .push(
                button(text("Edit").size(12))
                    .padding([4, 10])
                    .style(secondary_button_style)
                    .on_press(Message::Post(PostMessage::Edit(post.clone()))),
            )
            .push(
                button(text("Delete").size(12))
                    .padding([4, 10])
                    .style(danger_button_style)
                    .on_press(Message::Post(PostMessage::Delete(post.id))),
            );
    }

    let comments = Column::with_children(post.comments.iter().map(view_comment)).spacing(6);

    let content = column![
        header,
        text(&post.content).size(15).color(p.text_primary),
        comments,
        view_composer(post, drafts),
    ]
    .spacing(12);

    container(content)
        .padding(16)
        .width(Length::Fill)
        .style(card_style)
        .into()
}

fn view_comment(comment: &Comment) -> Element<'_, Message> {
    let p = palette::current();

    let line = column![
        row![
            text(&comment.author_username).size(13).font(BOLD).color(p.text_primary),
            text(time::relative(comment.created_at, Utc::now()))
                .size(11)
                .color(p.text_muted),
        ]
        .spacing(8)
        .align_y(Alignment::Center),
        text(&comment.content).size(13).color(p.text_secondary),
    ]
    .spacing(2);

    container(line)
        .padding([8, 12])
        .width(Length::Fill)
        .style(comment_style)
        .into()
}

fn view_composer<'a>(post: &'a Post, drafts: &'a CommentDrafts) -> Element<'a, Message> {
    let id = post.id;
    let composer = drafts.get(id);
    let submitting = composer.is_some_and(|c| c.submitting);

    let input = text_input("Write a comment...", drafts.input(id))
        .on_input(move |s| Message::Post(PostMessage::CommentChanged(id, s)))
        .on_submit(Message::Post(PostMessage::CommentSubmit(id)))
        .padding(8)
        .size(13)
        .style(input_style);

    let send = button(text(if submitting { "Posting..." } else { "Comment" }).size(13))
        .padding([8, 12])
        .style(secondary_button_style)
        .on_press_maybe((!submitting).then_some(Message::Post(PostMessage::CommentSubmit(id))));

    column![
        row![input, send].spacing(8).align_y(Alignment::Center),
        maybe_error(composer.and_then(|c| c.error.as_deref())),
    ]
    .spacing(4)
    .into()
}
