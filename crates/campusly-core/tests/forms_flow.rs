//! Forms, search and standalone pages against an in-memory backend.

#![allow(clippy::unwrap_used)]

mod common;

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use campusly_api::{GroupId, PostId, SocialApi};
use campusly_core::forms::{
    AddMemberModal, CommentComposer, CreateGroupModal, LoginForm, RegisterForm, RegisterStep,
};
use campusly_core::pages::{CreatePostPage, Destination, SearchPage, SettingsPage};
use common::FakeApi;

fn dyn_api(fake: &Arc<FakeApi>) -> Arc<dyn SocialApi> {
    fake.clone()
}

#[tokio::test]
async fn whitespace_comment_sends_nothing() {
    let fake = FakeApi::seeded();
    let refreshed = AtomicUsize::new(0);
    let mut composer = CommentComposer {
        input: "   ".into(),
        ..CommentComposer::default()
    };

    let result = composer
        .post(&dyn_api(&fake), PostId(1), || {
            refreshed.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert!(result.is_none());
    assert_eq!(composer.input, "   ");
    assert_eq!(refreshed.load(Ordering::SeqCst), 0);
    assert!(fake.calls().is_empty());
}

#[tokio::test]
async fn comment_posts_once_clears_and_refreshes_once() {
    let fake = FakeApi::seeded();
    let refreshed = AtomicUsize::new(0);
    let mut composer = CommentComposer {
        input: "hello".into(),
        ..CommentComposer::default()
    };

    let result = composer
        .post(&dyn_api(&fake), PostId(1), || {
            refreshed.fetch_add(1, Ordering::SeqCst);
        })
        .await;

    assert!(matches!(result, Some(Ok(_))));
    assert_eq!(fake.calls(), vec!["POST /posts/1/comments/".to_string()]);
    assert!(composer.input.is_empty());
    assert_eq!(refreshed.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn fast_typing_fires_one_search() {
    let fake = FakeApi::seeded();
    let api = dyn_api(&fake);
    let mut page = SearchPage::new(Duration::from_millis(300));

    let mut pending = Vec::new();
    for query in ["r", "ra", "rav", "ravi"] {
        pending.push(tokio::spawn(page.set_query(query.to_string()).unwrap()));
        tokio::time::sleep(Duration::from_millis(100)).await;
    }

    let mut fired = Vec::new();
    for handle in pending {
        if let Some(query) = handle.await.unwrap() {
            fired.push(query);
        }
    }
    assert_eq!(fired, vec!["ravi".to_string()]);

    let outcome = SearchPage::search(Arc::clone(&api), fired.remove(0)).await;
    assert!(page.apply(outcome));
    assert_eq!(fake.count("GET /users/?search="), 1);
    assert_eq!(page.results.len(), 1);
    assert!(!page.loading);
}

#[tokio::test(start_paused = true)]
async fn clearing_query_cancels_pending_search() {
    let mut page = SearchPage::new(Duration::from_millis(300));
    let pending = tokio::spawn(page.set_query("me".into()).unwrap());
    assert!(page.set_query("  ".into()).is_none());

    assert_eq!(pending.await.unwrap(), None);
    assert!(page.results.is_empty());
    assert!(!page.loading);
}

#[tokio::test]
async fn stale_search_results_are_ignored() {
    let fake = FakeApi::seeded();
    let mut page = SearchPage::new(Duration::from_millis(300));
    drop(page.set_query("ravi".into()));
    let outcome = SearchPage::search(dyn_api(&fake), "ra".into()).await;
    assert!(!page.apply(outcome));
    assert!(page.results.is_empty());
}

#[tokio::test]
async fn create_group_rejects_duplicates() {
    let fake = FakeApi::seeded();
    let api = dyn_api(&fake);
    let mut modal = CreateGroupModal::default();
    modal.open();
    modal.name = "Robotics".into();

    let request = modal.submit().unwrap();
    let result = CreateGroupModal::create(Arc::clone(&api), request).await;
    assert!(!modal.finish(&result));
    assert_eq!(
        modal.error.as_deref(),
        Some("A group with this name already exists.")
    );

    modal.name = "Debate".into();
    let request = modal.submit().unwrap();
    let result = CreateGroupModal::create(api, request).await;
    assert!(modal.finish(&result));
    assert!(!modal.open);
}

#[tokio::test]
async fn add_member_marks_added_and_echoes_errors() {
    let fake = FakeApi::seeded();
    let api = dyn_api(&fake);
    let mut modal = AddMemberModal::default();
    modal.open(GroupId(1));

    let outcome = AddMemberModal::search(Arc::clone(&api), "ravi".into()).await;
    drop(modal.set_query("ravi".into()));
    modal.apply_search(outcome);
    let ravi = modal.results[0].clone();

    let (group, user) = modal.begin_add(&ravi).unwrap();
    let (id, result) = AddMemberModal::add(Arc::clone(&api), group, user).await;
    assert!(modal.finish_add(id, &result));
    assert!(modal.added.contains(&ravi.id));
    assert!(modal.begin_add(&ravi).is_none());

    let asha = campusly_api::UserSummary {
        id: campusly_api::UserId(1),
        username: "asha".into(),
        bio: None,
        profile_photo: None,
    };
    let (group, user) = modal.begin_add(&asha).unwrap();
    let (id, result) = AddMemberModal::add(api, group, user).await;
    assert!(!modal.finish_add(id, &result));
    assert_eq!(modal.error.as_deref(), Some("User is already a member."));
}

#[tokio::test]
async fn registration_two_steps() {
    let fake = FakeApi::seeded();
    let api = dyn_api(&fake);
    let mut form = RegisterForm {
        email: "new@college.ac.in".into(),
        password: "pw".into(),
        ..RegisterForm::default()
    };

    let (email, password) = form.submit_details().unwrap();
    let result = RegisterForm::register(Arc::clone(&api), email, password).await;
    form.finish_details(result);
    assert_eq!(form.step, RegisterStep::Verify);

    form.set_otp("000000");
    let otp = form.submit_otp().unwrap();
    assert!(!form.finish_verify(RegisterForm::verify(Arc::clone(&api), otp).await));
    assert_eq!(form.error.as_deref(), Some("Invalid OTP."));

    form.set_otp("123456");
    let otp = form.submit_otp().unwrap();
    assert!(form.finish_verify(RegisterForm::verify(api, otp).await));
    assert_eq!(form.step, RegisterStep::Done);
}

#[tokio::test]
async fn login_returns_credential() {
    let fake = FakeApi::seeded();
    let mut form = LoginForm {
        email: "asha@college.ac.in".into(),
        password: "pw".into(),
        ..LoginForm::default()
    };
    let (email, password) = form.submit().unwrap();
    let credential = form.finish(LoginForm::login(dyn_api(&fake), email, password).await);
    assert_eq!(credential.map(|c| c.access), Some("access".to_string()));
    assert_eq!(fake.count("POST /auth/token/"), 1);
}

#[tokio::test]
async fn settings_save_updates_bio() {
    let fake = FakeApi::seeded();
    let api = dyn_api(&fake);
    let mut page = SettingsPage::default();
    page.begin();
    assert!(page.apply_user(SettingsPage::fetch(Arc::clone(&api)).await));
    assert_eq!(page.bio, "asha's bio");

    page.bio = "robotics lead".into();
    let submission = page.submit().unwrap();
    let username = page.apply_saved(SettingsPage::save(api, submission).await);

    assert_eq!(username.as_deref(), Some("asha"));
    assert_eq!(page.bio, "robotics lead");
    assert_eq!(fake.count("PATCH /auth/users/me/"), 1);
}

#[tokio::test]
async fn settings_missing_photo_fails_without_request() {
    let fake = FakeApi::seeded();
    let mut page = SettingsPage {
        photo_path: "/definitely/not/here.png".into(),
        ..SettingsPage::default()
    };
    let submission = page.submit().unwrap();
    let username = page.apply_saved(SettingsPage::save(dyn_api(&fake), submission).await);

    assert!(username.is_none());
    assert_eq!(
        page.error.as_deref(),
        Some("Failed to update profile. Please try again.")
    );
    assert_eq!(fake.count("PATCH"), 0);
}

#[tokio::test]
async fn create_post_offers_my_groups_and_navigates() {
    let fake = FakeApi::seeded();
    let api = dyn_api(&fake);
    let mut page = CreatePostPage::default();
    page.begin();
    assert!(page.apply_groups(CreatePostPage::fetch_groups(Arc::clone(&api)).await));
    assert_eq!(page.destinations.len(), 2);

    page.destination = page.destinations[1].clone();
    page.content = "meeting friday".into();
    let post = page.submit().unwrap();
    let target = page.apply_created(CreatePostPage::create(api, post).await);

    assert_eq!(target, Some(Some(GroupId(1))));
    assert!(page.content.is_empty());
    assert!(matches!(page.destination, Destination::Group { .. }));
}
