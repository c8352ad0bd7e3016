//! Home feed view.

use campusly_core::forms::CommentDrafts;
use campusly_core::pages::FeedView;
use iced::widget::{Row, button, column, text};
use iced::{Element, Length};

use super::common::{hint, load_state, maybe_error, page, title};
use super::post::view_posts;
use crate::message::{Message, Route};
use crate::style::widgets::{nav_button_style, palette};

/// Renders the feed with the user's groups above it.
pub fn view_feed<'a>(feed: &'a FeedView, drafts: &'a CommentDrafts) -> Element<'a, Message> {
    let me = feed.user.as_ref().map(|user| user.username.as_str());

    let mut content = column![title("Home")].spacing(16).width(Length::Fill);

    if let Some(groups) = feed.resource.as_ref().filter(|groups| !groups.is_empty()) {
        let p = palette::current();
        let chips = Row::with_children(groups.iter().map(|group| {
            button(text(&group.name).size(13))
                .padding([6, 12])
                .style(nav_button_style)
                .on_press(Message::Navigate(Route::Group(group.id.to_string())))
                .into()
        }))
        .spacing(6)
        .wrap();
        content = content.push(
            column![text("Your groups").size(12).color(p.text_secondary), chips].spacing(6),
        );
    }

    content = content.push(maybe_error(feed.notice.as_deref()));

    let posts = match load_state(feed.loading && feed.list.is_empty(), feed.error.as_ref()) {
        Some(state) => state,
        None if feed.user.is_none() => hint("Nothing loaded yet."),
        None => view_posts(
            &feed.list,
            me,
            drafts,
            "Your feed is empty. Follow people or join groups to see posts here.",
        ),
    };

    page(content.push(posts))
}
