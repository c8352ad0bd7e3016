//! Sign-in and registration views.

use campusly_core::forms::{LoginForm, OTP_LEN, RegisterForm, RegisterStep};
use iced::widget::{Space, button, column, container, text, text_input};
use iced::{Alignment, Element, Length};

use super::common::{BOLD, hint, labeled_input, maybe_error};
use crate::message::{LoginMessage, Message, RegisterMessage, Route};
use crate::style::widgets::{
    card_style, ghost_button_style, input_style, page_style, palette, primary_button_style,
};

/// Renders the login form.
pub fn view_login(form: &LoginForm) -> Element<'_, Message> {
    let p = palette::current();

    let password = column![
        text("Password").size(12).color(p.text_secondary),
        text_input("", &form.password)
            .on_input(|s| Message::Login(LoginMessage::PasswordChanged(s)))
            .on_submit(Message::Login(LoginMessage::Submit))
            .secure(true)
            .padding(10)
            .style(input_style),
    ]
    .spacing(4);

    let submit = button(text(if form.submitting { "Logging in..." } else { "Log in" }).font(BOLD))
        .padding([10, 20])
        .width(Length::Fill)
        .style(primary_button_style)
        .on_press_maybe((!form.submitting).then_some(Message::Login(LoginMessage::Submit)));

    let message = form
        .message
        .as_deref()
        .map_or_else(|| Space::new().height(0).into(), hint);

    let content = column![
        text("Welcome back").size(26).font(BOLD).color(p.text_primary),
        hint("Sign in to your campus network."),
        labeled_input("Email", "you@college.edu", &form.email, |s| {
            Message::Login(LoginMessage::EmailChanged(s))
        }),
        password,
        submit,
        message,
        button(text("New here? Create an account").size(13))
            .style(ghost_button_style)
            .on_press(Message::Navigate(Route::Register)),
    ]
    .spacing(14)
    .align_x(Alignment::Center);

    centered_card(content)
}

/// Renders the registration form for its current step.
pub fn view_register(form: &RegisterForm) -> Element<'_, Message> {
    let p = palette::current();

    let step: Element<'_, Message> = match form.step {
        RegisterStep::Details => view_details(form),
        RegisterStep::Verify => view_verify(form),
        RegisterStep::Done => column![
            text(form.message.as_deref().unwrap_or_default())
                .size(14)
                .color(p.accent_green),
            button(text("Go to login").font(BOLD))
                .padding([10, 20])
                .style(primary_button_style)
                .on_press(Message::Navigate(Route::Login)),
        ]
        .spacing(14)
        .into(),
    };

    let content = column![
        text("Create your account").size(26).font(BOLD).color(p.text_primary),
        step,
        maybe_error(form.error.as_deref()),
        button(text("Already registered? Log in").size(13))
            .style(ghost_button_style)
            .on_press(Message::Navigate(Route::Login)),
    ]
    .spacing(14)
    .align_x(Alignment::Center);

    centered_card(content)
}

fn view_details(form: &RegisterForm) -> Element<'_, Message> {
    let p = palette::current();

    let password = column![
        text("Password").size(12).color(p.text_secondary),
        text_input("", &form.password)
            .on_input(|s| Message::Register(RegisterMessage::PasswordChanged(s)))
            .on_submit(Message::Register(RegisterMessage::SubmitDetails))
            .secure(true)
            .padding(10)
            .style(input_style),
    ]
    .spacing(4);

    column![
        hint("We'll email you a one-time code."),
        labeled_input("College email", "you@college.edu", &form.email, |s| {
            Message::Register(RegisterMessage::EmailChanged(s))
        }),
        password,
        button(text(if form.submitting { "Sending..." } else { "Send code" }).font(BOLD))
            .padding([10, 20])
            .width(Length::Fill)
            .style(primary_button_style)
            .on_press_maybe(
                (!form.submitting).then_some(Message::Register(RegisterMessage::SubmitDetails)),
            ),
    ]
    .spacing(14)
    .into()
}

fn view_verify(form: &RegisterForm) -> Element<'_, Message> {
    let message = form
        .message
        .as_deref()
        .map_or_else(|| Space::new().height(0).into(), hint);
    let ready = form.otp.len() == OTP_LEN && !form.submitting;

    column![
        message,
        text_input("6-digit code", &form.otp)
            .on_input(|s| Message::Register(RegisterMessage::OtpChanged(s)))
            .on_submit(Message::Register(RegisterMessage::SubmitOtp))
            .padding(10)
            .size(20)
            .style(input_style),
        button(text(if form.submitting { "Verifying..." } else { "Verify" }).font(BOLD))
            .padding([10, 20])
            .width(Length::Fill)
            .style(primary_button_style)
            .on_press_maybe(ready.then_some(Message::Register(RegisterMessage::SubmitOtp))),
    ]
    .spacing(14)
    .into()
}

fn centered_card<'a>(content: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    let card = container(content)
        .max_width(420.0)
        .padding(32)
        .style(card_style);

    container(card)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .style(page_style)
        .into()
}
