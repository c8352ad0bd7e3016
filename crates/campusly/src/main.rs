//! `Campusly` - desktop client for a college social network.
//!
//! Built with Rust and the iced GUI framework. Page state and the
//! fetch/mutate contract live in `campusly-core`; this crate only wires
//! messages to them and renders the result.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod message;
mod style;
mod view;

use std::sync::Arc;

use anyhow::Context;
use campusly_api::{ApiClient, GroupId, PostId, Session, SocialApi};
use campusly_core::forms::{
    AddMemberModal, CommentComposer, CommentDrafts, ConfirmDelete, CreateGroupModal,
    EditPostModal, LoginForm, RegisterForm,
};
use campusly_core::pages::{
    CreatePostPage, FeedView, GroupAction, GroupView, GroupsAction, GroupsView, PostAction,
    ProfileAction, ProfileView, SearchPage, SettingsPage,
};
use campusly_core::{
    Config, LoadEffect, Loaded, MutationEffect, Mutated, Resource, SyncedView, ViewError,
    credentials, sync,
};
use iced::keyboard::{self, Key, Modifiers};
use iced::widget::column;
use iced::{Element, Length, Subscription, Task};
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use message::{
    AddMemberMessage, CreateGroupMessage, CreatePostMessage, LoginMessage, Message, PostMessage,
    RegisterMessage, Route, SearchMessage, SettingsMessage, Shortcut,
};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "campusly=debug,campusly_core=debug,campusly_api=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Campusly");

    let config = load_config()?;
    let stored = credentials::load_session().unwrap_or_else(|e| {
        warn!("Failed to read stored session: {e}");
        None
    });
    let signed_in = stored.is_some();
    let session = stored.map_or_else(Session::new, Session::with_credential);
    let client = ApiClient::with_timeout(&config.api_base_url, session, config.request_timeout())
        .with_context(|| format!("invalid API base URL {}", config.api_base_url))?
        .on_refresh(|credential| {
            if let Err(e) = credentials::store_session(credential) {
                warn!("Failed to store refreshed session: {e}");
            }
        });
    let api: Arc<dyn SocialApi> = Arc::new(client);

    style::widgets::palette::set_theme(config.theme);

    iced::application(
        move || Campusly::new(config.clone(), Arc::clone(&api), signed_in),
        Campusly::update,
        Campusly::view,
    )
    .title("Campusly")
    .subscription(Campusly::subscription)
    .run()?;

    Ok(())
}

/// Reads the config before the UI starts; the client is built from it.
fn load_config() -> anyhow::Result<Config> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start config runtime")?;
    Ok(runtime.block_on(Config::load()).unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {e}");
        Config::default()
    }))
}

/// Main application state.
struct Campusly {
    /// Persisted settings.
    config: Config,
    /// Shared API client.
    api: Arc<dyn SocialApi>,
    /// Page being shown.
    route: Route,
    login: LoginForm,
    register: RegisterForm,
    feed: FeedView,
    groups: GroupsView,
    group: GroupView,
    profile: ProfileView,
    search: SearchPage,
    settings: SettingsPage,
    create_post: CreatePostPage,
    /// Per-post comment inputs.
    comments: CommentDrafts,
    confirm_delete: ConfirmDelete,
    edit_post: EditPostModal,
    create_group: CreateGroupModal,
    add_member: AddMemberModal,
}

impl Campusly {
    /// Create the app; signed-in users land on the feed.
    fn new(config: Config, api: Arc<dyn SocialApi>, signed_in: bool) -> (Self, Task<Message>) {
        let debounce = config.debounce();
        let mut app = Self {
            config,
            api,
            route: Route::Login,
            login: LoginForm::default(),
            register: RegisterForm::default(),
            feed: FeedView::new(),
            groups: GroupsView::new(),
            group: GroupView::new(),
            profile: ProfileView::new(),
            search: SearchPage::new(debounce),
            settings: SettingsPage::default(),
            create_post: CreatePostPage::default(),
            comments: CommentDrafts::default(),
            confirm_delete: ConfirmDelete::default(),
            edit_post: EditPostModal::default(),
            create_group: CreateGroupModal::default(),
            add_member: AddMemberModal::new(debounce),
        };

        let task = if signed_in {
            info!("Restored stored session");
            app.navigate(Route::Feed)
        } else {
            Task::none()
        };
        (app, task)
    }

    /// Handle messages and update state.
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Navigate(route) => self.navigate(route),
            Message::Refresh => self.load_route(),
            Message::Logout => {
                info!("Logging out");
                self.sign_out()
            }
            Message::ToggleTheme => self.handle_toggle_theme(),
            Message::ConfigSaved(result) => {
                if let Err(e) = result {
                    warn!("Failed to save config: {e}");
                }
                Task::none()
            }
            Message::Keyboard(shortcut) => self.handle_shortcut(shortcut),
            Message::Login(msg) => self.handle_login(msg),
            Message::Register(msg) => self.handle_register(msg),
            Message::FeedLoaded(loaded) => {
                let effect = self.feed.apply(loaded);
                self.after_load(effect)
            }
            Message::GroupsLoaded(loaded) => {
                let effect = self.groups.apply(loaded);
                self.after_load(effect)
            }
            Message::GroupLoaded(loaded) => {
                let effect = self.group.apply(loaded);
                self.after_load(effect)
            }
            Message::ProfileLoaded(loaded) => {
                let effect = self.profile.apply(loaded);
                self.after_load(effect)
            }
            Message::FeedMutated(mutated) => {
                let effect = self.feed.apply_mutation(mutated);
                let notice = self.feed.notice.clone();
                self.after_mutation(effect, notice.as_deref())
            }
            Message::GroupsMutated(mutated) => {
                let effect = self.groups.apply_mutation(mutated);
                let notice = self.groups.notice.clone();
                self.after_mutation(effect, notice.as_deref())
            }
            Message::GroupMutated(mutated) => {
                let effect = self.group.apply_mutation(mutated);
                let notice = self.group.notice.clone();
                self.after_mutation(effect, notice.as_deref())
            }
            Message::ProfileMutated(mutated) => {
                let effect = self.profile.apply_mutation(mutated);
                let notice = self.profile.notice.clone();
                self.after_mutation(effect, notice.as_deref())
            }
            Message::ToggleMembership(group) => self.handle_toggle_membership(group),
            Message::ToggleFollow => self.handle_toggle_follow(),
            Message::Post(msg) => self.handle_post(msg),
            Message::Search(msg) => self.handle_search(msg),
            Message::Settings(msg) => self.handle_settings(msg),
            Message::CreatePost(msg) => self.handle_create_post(msg),
            Message::CreateGroup(msg) => self.handle_create_group(msg),
            Message::AddMember(msg) => self.handle_add_member(msg),
        }
    }

    /// Leave the current page and load the next one.
    fn navigate(&mut self, route: Route) -> Task<Message> {
        debug!(?route, "Navigating");
        self.unmount_pages();
        self.dismiss_modals();
        self.route = route;
        self.load_route()
    }

    /// Start the reads for the current page.
    fn load_route(&mut self) -> Task<Message> {
        let api = &self.api;
        match &self.route {
            Route::Login | Route::Register => Task::none(),
            Route::Feed => load(&mut self.feed, api, "", Message::FeedLoaded),
            Route::Groups => load(&mut self.groups, api, "", Message::GroupsLoaded),
            Route::Group(id) => load(&mut self.group, api, id, Message::GroupLoaded),
            Route::Profile(username) => {
                load(&mut self.profile, api, username, Message::ProfileLoaded)
            }
            Route::Search => {
                let query = self.search.query.clone();
                self.search
                    .set_query(query)
                    .map_or_else(Task::none, |settled| {
                        Task::perform(settled, |q| Message::Search(SearchMessage::Settled(q)))
                    })
            }
            Route::Settings => {
                self.settings.begin();
                Task::perform(SettingsPage::fetch(Arc::clone(api)), |r| {
                    Message::Settings(SettingsMessage::Loaded(r))
                })
            }
            Route::CreatePost => {
                self.create_post.begin();
                Task::perform(CreatePostPage::fetch_groups(Arc::clone(api)), |r| {
                    Message::CreatePost(CreatePostMessage::GroupsLoaded(r))
                })
            }
        }
    }

    /// Cancel in-flight page work so late results are dropped.
    fn unmount_pages(&mut self) {
        self.feed.unmount();
        self.groups.unmount();
        self.group.unmount();
        self.profile.unmount();
        self.search.reset();
    }

    fn dismiss_modals(&mut self) {
        self.confirm_delete.cancel();
        self.edit_post.close();
        self.create_group.close();
        self.add_member.close();
    }

    fn after_load(&mut self, effect: LoadEffect) -> Task<Message> {
        match effect {
            LoadEffect::Ready => {
                let visible = self.visible_posts();
                self.comments.retain_posts(&visible);
                Task::none()
            }
            LoadEffect::RedirectToLogin => self.redirect_to_login(),
            LoadEffect::Failed | LoadEffect::Discarded => Task::none(),
        }
    }

    fn after_mutation(&mut self, effect: MutationEffect, notice: Option<&str>) -> Task<Message> {
        if self.edit_post.saving {
            self.edit_post.finish(effect, notice);
        }
        match effect {
            MutationEffect::Reload => self.load_route(),
            MutationEffect::RedirectToLogin => self.redirect_to_login(),
            MutationEffect::Patched | MutationEffect::Failed | MutationEffect::Discarded => {
                Task::none()
            }
        }
    }

    /// Posts shown on the current page.
    fn visible_posts(&self) -> Vec<PostId> {
        let posts = match self.route {
            Route::Feed => &self.feed.list,
            Route::Group(_) => &self.group.list,
            Route::Profile(_) => &self.profile.list,
            _ => return Vec::new(),
        };
        posts.iter().map(|post| post.id).collect()
    }

    /// Routes a post write to the page showing the post.
    fn mutate_posts(&mut self, action: PostAction) -> Option<Task<Message>> {
        let api = &self.api;
        match self.route {
            Route::Feed => mutate(&mut self.feed, api, action, Message::FeedMutated),
            Route::Group(_) => mutate(
                &mut self.group,
                api,
                GroupAction::Post(action),
                Message::GroupMutated,
            ),
            Route::Profile(_) => mutate(
                &mut self.profile,
                api,
                ProfileAction::Post(action),
                Message::ProfileMutated,
            ),
            _ => {
                debug!("No page showing posts, ignoring post action");
                None
            }
        }
    }

    /// The stored session was rejected; forget it and show the login form.
    fn redirect_to_login(&mut self) -> Task<Message> {
        warn!("Session is no longer valid, signing out");
        self.login.message = Some(ViewError::Unauthorized.to_string());
        self.sign_out()
    }

    fn sign_out(&mut self) -> Task<Message> {
        if let Err(e) = credentials::delete_session() {
            warn!("Failed to clear stored session: {e}");
        }
        self.unmount_pages();
        self.dismiss_modals();
        clear(&mut self.feed);
        clear(&mut self.groups);
        clear(&mut self.group);
        clear(&mut self.profile);
        self.comments = CommentDrafts::default();
        self.route = Route::Login;

        let api = Arc::clone(&self.api);
        Task::future(async move { api.logout().await }).discard()
    }

    fn handle_toggle_theme(&mut self) -> Task<Message> {
        self.config.theme = self.config.theme.toggled();
        style::widgets::palette::set_theme(self.config.theme);
        info!("Theme changed to {:?}", self.config.theme);

        let config = self.config.clone();
        Task::perform(
            async move { config.save().await.map_err(|e| e.to_string()) },
            Message::ConfigSaved,
        )
    }

    fn handle_shortcut(&mut self, shortcut: Option<Shortcut>) -> Task<Message> {
        match shortcut {
            Some(Shortcut::Dismiss) => {
                self.dismiss_modals();
                Task::none()
            }
            Some(Shortcut::Refresh) if self.route.requires_session() => self.load_route(),
            _ => Task::none(),
        }
    }

    fn handle_login(&mut self, msg: LoginMessage) -> Task<Message> {
        match msg {
            LoginMessage::EmailChanged(email) => self.login.email = email,
            LoginMessage::PasswordChanged(password) => self.login.password = password,
            LoginMessage::Submit => {
                if let Some((email, password)) = self.login.submit() {
                    return Task::perform(
                        LoginForm::login(Arc::clone(&self.api), email, password),
                        |r| Message::Login(LoginMessage::Finished(r)),
                    );
                }
            }
            LoginMessage::Finished(result) => {
                if let Some(credential) = self.login.finish(result) {
                    if let Err(e) = credentials::store_session(&credential) {
                        warn!("Failed to store session: {e}");
                    }
                    self.login = LoginForm::default();
                    return self.navigate(Route::Feed);
                }
            }
        }
        Task::none()
    }

    fn handle_register(&mut self, msg: RegisterMessage) -> Task<Message> {
        match msg {
            RegisterMessage::EmailChanged(email) => self.register.email = email,
            RegisterMessage::PasswordChanged(password) => self.register.password = password,
            RegisterMessage::OtpChanged(otp) => self.register.set_otp(&otp),
            RegisterMessage::SubmitDetails => {
                if let Some((email, password)) = self.register.submit_details() {
                    return Task::perform(
                        RegisterForm::register(Arc::clone(&self.api), email, password),
                        |r| Message::Register(RegisterMessage::DetailsFinished(r)),
                    );
                }
            }
            RegisterMessage::DetailsFinished(result) => self.register.finish_details(result),
            RegisterMessage::SubmitOtp => {
                if let Some(otp) = self.register.submit_otp() {
                    return Task::perform(RegisterForm::verify(Arc::clone(&self.api), otp), |r| {
                        Message::Register(RegisterMessage::VerifyFinished(r))
                    });
                }
            }
            RegisterMessage::VerifyFinished(result) => {
                if self.register.finish_verify(result) {
                    info!("Registration complete");
                }
            }
        }
        Task::none()
    }

    fn handle_toggle_membership(&mut self, group: GroupId) -> Task<Message> {
        let api = &self.api;
        let task = match self.route {
            Route::Groups => mutate(
                &mut self.groups,
                api,
                GroupsAction::ToggleMembership(group),
                Message::GroupsMutated,
            ),
            Route::Group(_) if self.group.param() == Some(&group) => mutate(
                &mut self.group,
                api,
                GroupAction::ToggleMembership,
                Message::GroupMutated,
            ),
            _ => None,
        };
        task.unwrap_or_else(Task::none)
    }

    fn handle_toggle_follow(&mut self) -> Task<Message> {
        let Some(profile) = self.profile.resource.as_ref() else {
            return Task::none();
        };
        let action = ProfileAction::toggle_follow(profile);
        mutate(&mut self.profile, &self.api, action, Message::ProfileMutated)
            .unwrap_or_else(Task::none)
    }

    fn handle_post(&mut self, msg: PostMessage) -> Task<Message> {
        match msg {
            PostMessage::CommentChanged(post, input) => self.comments.entry(post).input = input,
            PostMessage::CommentSubmit(post) => {
                if let Some(content) = self.comments.entry(post).submit() {
                    return Task::perform(
                        CommentComposer::send(Arc::clone(&self.api), post, content),
                        move |r| Message::Post(PostMessage::CommentFinished(post, r)),
                    );
                }
            }
            PostMessage::CommentFinished(post, result) => {
                if matches!(result, Err(ViewError::Unauthorized)) {
                    return self.redirect_to_login();
                }
                if self.comments.entry(post).finish(&result) {
                    return self.load_route();
                }
            }
            PostMessage::Edit(post) => self.edit_post.open(&post),
            PostMessage::EditChanged(content) => self.edit_post.content = content,
            PostMessage::EditSubmit => {
                if let Some(action) = self.edit_post.submit() {
                    return self.mutate_posts(action).unwrap_or_else(|| {
                        self.edit_post.finish(MutationEffect::Failed, None);
                        Task::none()
                    });
                }
            }
            PostMessage::EditCancel => self.edit_post.close(),
            PostMessage::Delete(post) => self.confirm_delete.request(post),
            PostMessage::DeleteConfirm => {
                if let Some(post) = self.confirm_delete.confirm() {
                    info!(%post, "Deleting post");
                    return self
                        .mutate_posts(PostAction::Delete(post))
                        .unwrap_or_else(Task::none);
                }
            }
            PostMessage::DeleteCancel => self.confirm_delete.cancel(),
        }
        Task::none()
    }

    fn handle_search(&mut self, msg: SearchMessage) -> Task<Message> {
        match msg {
            SearchMessage::QueryChanged(query) => {
                if let Some(settled) = self.search.set_query(query) {
                    return Task::perform(settled, |q| Message::Search(SearchMessage::Settled(q)));
                }
            }
            SearchMessage::Settled(Some(query)) => {
                return Task::perform(SearchPage::search(Arc::clone(&self.api), query), |o| {
                    Message::Search(SearchMessage::Finished(o))
                });
            }
            SearchMessage::Settled(None) => {}
            SearchMessage::Finished(outcome) => {
                if matches!(outcome.result, Err(ViewError::Unauthorized)) {
                    return self.redirect_to_login();
                }
                self.search.apply(outcome);
            }
        }
        Task::none()
    }

    fn handle_settings(&mut self, msg: SettingsMessage) -> Task<Message> {
        match msg {
            SettingsMessage::Loaded(result) => {
                if !self.settings.apply_user(result) {
                    return self.redirect_to_login();
                }
            }
            SettingsMessage::BioChanged(bio) => self.settings.bio = bio,
            SettingsMessage::PhotoPathChanged(path) => self.settings.photo_path = path,
            SettingsMessage::Submit => {
                if let Some(submission) = self.settings.submit() {
                    return Task::perform(
                        SettingsPage::save(Arc::clone(&self.api), submission),
                        |r| Message::Settings(SettingsMessage::Saved(r)),
                    );
                }
            }
            SettingsMessage::Saved(result) => {
                if matches!(result, Err(ViewError::Unauthorized)) {
                    return self.redirect_to_login();
                }
                if let Some(username) = self.settings.apply_saved(result) {
                    return self.navigate(Route::Profile(username));
                }
            }
        }
        Task::none()
    }

    fn handle_create_post(&mut self, msg: CreatePostMessage) -> Task<Message> {
        match msg {
            CreatePostMessage::GroupsLoaded(result) => {
                if !self.create_post.apply_groups(result) {
                    return self.redirect_to_login();
                }
            }
            CreatePostMessage::ContentChanged(content) => self.create_post.content = content,
            CreatePostMessage::DestinationSelected(destination) => {
                self.create_post.destination = destination;
            }
            CreatePostMessage::Submit => {
                if let Some(post) = self.create_post.submit() {
                    return Task::perform(
                        CreatePostPage::create(Arc::clone(&self.api), post),
                        |r| Message::CreatePost(CreatePostMessage::Finished(r)),
                    );
                }
            }
            CreatePostMessage::Finished(result) => {
                if matches!(result, Err(ViewError::Unauthorized)) {
                    return self.redirect_to_login();
                }
                match self.create_post.apply_created(result) {
                    Some(Some(group)) => return self.navigate(Route::Group(group.to_string())),
                    Some(None) => return self.navigate(Route::Feed),
                    None => {}
                }
            }
        }
        Task::none()
    }

    fn handle_create_group(&mut self, msg: CreateGroupMessage) -> Task<Message> {
        match msg {
            CreateGroupMessage::Open => self.create_group.open(),
            CreateGroupMessage::NameChanged(name) => self.create_group.name = name,
            CreateGroupMessage::DescriptionChanged(description) => {
                self.create_group.description = description;
            }
            CreateGroupMessage::Submit => {
                if let Some(group) = self.create_group.submit() {
                    return Task::perform(
                        CreateGroupModal::create(Arc::clone(&self.api), group),
                        |r| Message::CreateGroup(CreateGroupMessage::Finished(r)),
                    );
                }
            }
            CreateGroupMessage::Cancel => self.create_group.close(),
            CreateGroupMessage::Finished(result) => {
                if matches!(result, Err(ViewError::Unauthorized)) {
                    return self.redirect_to_login();
                }
                if self.create_group.finish(&result) {
                    return self.load_route();
                }
            }
        }
        Task::none()
    }

    fn handle_add_member(&mut self, msg: AddMemberMessage) -> Task<Message> {
        match msg {
            AddMemberMessage::Open(group) => self.add_member.open(group),
            AddMemberMessage::QueryChanged(query) => {
                if let Some(settled) = self.add_member.set_query(query) {
                    return Task::perform(settled, |q| {
                        Message::AddMember(AddMemberMessage::Settled(q))
                    });
                }
            }
            AddMemberMessage::Settled(Some(query)) => {
                return Task::perform(AddMemberModal::search(Arc::clone(&self.api), query), |o| {
                    Message::AddMember(AddMemberMessage::Results(o))
                });
            }
            AddMemberMessage::Settled(None) => {}
            AddMemberMessage::Results(outcome) => self.add_member.apply_search(outcome),
            AddMemberMessage::Add(user) => {
                if let Some((group, user)) = self.add_member.begin_add(&user) {
                    return Task::perform(
                        AddMemberModal::add(Arc::clone(&self.api), group, user),
                        |(id, r)| Message::AddMember(AddMemberMessage::Finished(id, r)),
                    );
                }
            }
            AddMemberMessage::Finished(user, result) => {
                if matches!(result, Err(ViewError::Unauthorized)) {
                    return self.redirect_to_login();
                }
                if self.add_member.finish_add(user, &result) {
                    return self.load_route();
                }
            }
            AddMemberMessage::Close => self.add_member.close(),
        }
        Task::none()
    }

    /// Render current state as UI.
    fn view(&self) -> Element<'_, Message> {
        let page = match &self.route {
            Route::Login => return view::view_login(&self.login),
            Route::Register => return view::view_register(&self.register),
            Route::Feed => view::view_feed(&self.feed, &self.comments),
            Route::Groups => view::view_groups(&self.groups),
            Route::Group(_) => view::view_group(&self.group, &self.comments),
            Route::Profile(_) => view::view_profile(&self.profile, &self.comments),
            Route::Search => view::view_search(&self.search),
            Route::Settings => view::view_settings(&self.settings, self.config.theme),
            Route::CreatePost => view::view_create_post(&self.create_post),
        };

        let body = if self.confirm_delete.pending().is_some() {
            view::view_confirm_delete()
        } else if self.edit_post.is_open() {
            view::view_edit_post(&self.edit_post)
        } else if self.create_group.open {
            view::view_create_group(&self.create_group)
        } else if self.add_member.is_open() {
            view::view_add_member(&self.add_member)
        } else {
            page
        };

        column![view::view_header(&self.route), body]
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Subscribe to keyboard events for shortcuts.
    #[allow(clippy::unused_self)] // Required signature for iced subscription
    fn subscription(&self) -> Subscription<Message> {
        keyboard::listen().map(|event| {
            if let keyboard::Event::KeyPressed { key, modifiers, .. } = event {
                Message::Keyboard(shortcut(&key, modifiers))
            } else {
                Message::Keyboard(None)
            }
        })
    }
}

/// Map a key press to a shortcut.
fn shortcut(key: &Key, modifiers: Modifiers) -> Option<Shortcut> {
    match key {
        Key::Named(keyboard::key::Named::Escape) => Some(Shortcut::Dismiss),
        // Ctrl+R (Cmd+R on macOS)
        Key::Character(c) if modifiers.command() && c.as_str() == "r" => Some(Shortcut::Refresh),
        _ => None,
    }
}

/// Begin a load and hand the reads to the runtime.
fn load<R: Resource>(
    view: &mut SyncedView<R>,
    api: &Arc<dyn SocialApi>,
    raw: &str,
    settled: fn(Loaded<R>) -> Message,
) -> Task<Message> {
    match view.begin(raw) {
        Ok(ticket) => Task::perform(sync::fetch(Arc::clone(api), ticket), settled),
        Err(error) => {
            debug!("Load not started: {error}");
            Task::none()
        }
    }
}

/// Begin a write; `None` when nothing is loaded to write against.
fn mutate<R: Resource>(
    view: &mut SyncedView<R>,
    api: &Arc<dyn SocialApi>,
    action: R::Action,
    settled: fn(Mutated<R>) -> Message,
) -> Option<Task<Message>> {
    view.begin_mutation(action)
        .ok()
        .map(|ticket| Task::perform(sync::perform(Arc::clone(api), ticket), settled))
}

/// Drop everything a view read from the server.
fn clear<R: Resource>(view: &mut SyncedView<R>) {
    view.user = None;
    view.resource = None;
    view.list.clear();
    view.error = None;
    view.notice = None;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_dismisses() {
        let key = Key::Named(keyboard::key::Named::Escape);
        assert_eq!(shortcut(&key, Modifiers::empty()), Some(Shortcut::Dismiss));
    }

    #[test]
    fn test_plain_r_is_not_refresh() {
        let key = Key::Character("r".into());
        assert_eq!(shortcut(&key, Modifiers::empty()), None);
        assert_eq!(shortcut(&key, Modifiers::COMMAND), Some(Shortcut::Refresh));
    }

    #[test]
    fn test_login_pages_need_no_session() {
        assert!(!Route::Login.requires_session());
        assert!(!Route::Register.requires_session());
        assert!(Route::Group("3".into()).requires_session());
    }
}
