//! Create-post view.

use campusly_core::pages::CreatePostPage;
use iced::widget::{Space, button, column, container, pick_list, row, text, text_input};
use iced::{Alignment, Element, Length};

use super::common::{BOLD, maybe_error, page, title};
use crate::message::{CreatePostMessage, Message, Route};
use crate::style::widgets::{
    card_style, input_style, palette, primary_button_style, secondary_button_style,
};

/// Renders the new-post form.
pub fn view_create_post(state: &CreatePostPage) -> Element<'_, Message> {
    let p = palette::current();

    let destination = column![
        text("Post to").size(12).color(p.text_secondary),
        pick_list(
            state.destinations.as_slice(),
            Some(state.destination.clone()),
            |d| Message::CreatePost(CreatePostMessage::DestinationSelected(d)),
        )
        .padding(10)
        .width(Length::Fill),
    ]
    .spacing(4);

    let body = text_input("What's happening on campus?", &state.content)
        .on_input(|s| Message::CreatePost(CreatePostMessage::ContentChanged(s)))
        .on_submit(Message::CreatePost(CreatePostMessage::Submit))
        .padding(12)
        .size(15)
        .style(input_style);

    let submit = button(
        text(if state.submitting {
            "Posting..."
        } else {
            "Post"
        })
        .font(BOLD),
    )
    .padding([10, 24])
    .style(primary_button_style)
    .on_press_maybe(
        (!state.submitting && !state.loading)
            .then_some(Message::CreatePost(CreatePostMessage::Submit)),
    );

    let actions = row![
        button(text("Cancel").size(14))
            .padding([10, 20])
            .style(secondary_button_style)
            .on_press(Message::Navigate(Route::Feed)),
        Space::new().width(Length::Fill),
        submit,
    ]
    .align_y(Alignment::Center);

    let form = column![destination, body, maybe_error(state.error.as_deref()), actions]
        .spacing(14);

    page(
        column![
            title("Create post"),
            container(form)
                .padding(20)
                .width(Length::Fill)
                .style(card_style),
        ]
        .spacing(16),
    )
}
