//! Layout pieces shared by every page.

use campusly_core::ViewError;
use iced::font::Weight;
use iced::widget::{Space, column, container, scrollable, text, text_input};
use iced::{Element, Font, Length};

use crate::message::Message;
use crate::style::widgets::{input_style, page_style, palette, scrollable_style};

/// Semibold UI font.
pub const BOLD: Font = Font {
    weight: Weight::Semibold,
    ..Font::DEFAULT
};

/// Centered, scrollable page body.
pub fn page<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    let body = container(content).max_width(760.0).padding([24, 24]);

    container(
        scrollable(container(body).center_x(Length::Fill))
            .height(Length::Fill)
            .style(scrollable_style),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .style(page_style)
    .into()
}

/// Page heading.
pub fn title<'a>(label: impl text::IntoFragment<'a>) -> Element<'a, Message> {
    let p = palette::current();
    text(label).size(26).font(BOLD).color(p.text_primary).into()
}

/// Loading indicator or load error, if either applies.
pub fn load_state<'a>(loading: bool, error: Option<&ViewError>) -> Option<Element<'a, Message>> {
    let p = palette::current();
    if loading {
        return Some(text("Loading...").size(14).color(p.text_muted).into());
    }
    error.map(|error| error_text(error.summary()))
}

/// Inline error line.
pub fn error_text<'a>(message: impl text::IntoFragment<'a>) -> Element<'a, Message> {
    let p = palette::current();
    text(message).size(13).color(p.accent_red).into()
}

/// Optional error line; empty space when there is nothing to say.
pub fn maybe_error(message: Option<&str>) -> Element<'_, Message> {
    message.map_or_else(|| Space::new().height(0).into(), error_text)
}

/// Muted helper text.
pub fn hint<'a>(message: impl text::IntoFragment<'a>) -> Element<'a, Message> {
    let p = palette::current();
    text(message).size(14).color(p.text_muted).into()
}

/// Label above an input.
pub fn labeled_input<'a>(
    label: &'a str,
    placeholder: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
) -> Element<'a, Message> {
    let p = palette::current();
    column![
        text(label).size(12).color(p.text_secondary),
        text_input(placeholder, value)
            .on_input(on_input)
            .padding(10)
            .style(input_style),
    ]
    .spacing(4)
    .into()
}
