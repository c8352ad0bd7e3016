//! In-memory stand-in for the REST service.

#![allow(dead_code, clippy::unwrap_used, clippy::missing_panics_doc)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use campusly_api::{
    Acknowledgement, Comment, CommentId, Credential, CurrentUser, Error, FieldErrors, Group,
    GroupId, MembershipChange, NewGroup, NewPost, Post, PostFilter, PostId, Profile,
    ProfileUpdate, Result, SocialApi, UserId, UserSummary,
};
use chrono::{TimeZone, Utc};

#[derive(Debug)]
struct State {
    me: String,
    users: Vec<UserSummary>,
    posts: Vec<Post>,
    groups: Vec<Group>,
    members: HashMap<GroupId, HashSet<String>>,
    following: HashMap<String, HashSet<String>>,
    authorized: bool,
    next_id: i64,
}

/// Fake backend recording every request as `"METHOD /path/"`.
#[derive(Debug)]
pub struct FakeApi {
    state: Mutex<State>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    /// A small campus: asha (signed in), ravi and meera; one group owned
    /// by asha with asha as member; two posts in the feed.
    pub fn seeded() -> Arc<Self> {
        let users = ["asha", "ravi", "meera"]
            .iter()
            .zip(1..)
            .map(|(name, id)| UserSummary {
                id: UserId(id),
                username: (*name).to_string(),
                bio: Some(format!("{name}'s bio")),
                profile_photo: None,
            })
            .collect();

        let mut api = State {
            me: "asha".into(),
            users,
            posts: Vec::new(),
            groups: Vec::new(),
            members: HashMap::new(),
            following: HashMap::new(),
            authorized: true,
            next_id: 100,
        };
        api.groups.push(Group {
            id: GroupId(1),
            name: "Robotics".into(),
            description: Some("Build things".into()),
            member_count: 1,
            owner: Some(UserId(1)),
            owner_username: "asha".into(),
            is_member: true,
            created_at: None,
        });
        api.groups.push(Group {
            id: GroupId(2),
            name: "Astronomy".into(),
            description: None,
            member_count: 1,
            owner: Some(UserId(2)),
            owner_username: "ravi".into(),
            is_member: false,
            created_at: None,
        });
        api.members.insert(GroupId(1), HashSet::from(["asha".to_string()]));
        api.members.insert(GroupId(2), HashSet::from(["ravi".to_string()]));
        api.posts.push(post(1, "asha", "first post", None));
        api.posts.push(post(2, "ravi", "telescope night", Some(GroupId(2))));
        api.posts.push(post(3, "asha", "robot arm works", Some(GroupId(1))));

        Arc::new(Self {
            state: Mutex::new(api),
            calls: Mutex::new(Vec::new()),
        })
    }

    /// Every request so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Requests matching a prefix.
    pub fn count(&self, prefix: &str) -> usize {
        self.calls().iter().filter(|c| c.starts_with(prefix)).count()
    }

    /// Makes every request fail with 401.
    pub fn expire_session(&self) {
        self.state.lock().unwrap().authorized = false;
    }

    /// Server-side membership flip, bypassing the client.
    pub fn set_member(&self, group: GroupId, member: bool) {
        let mut state = self.state.lock().unwrap();
        let me = state.me.clone();
        let members = state.members.entry(group).or_default();
        if member {
            members.insert(me);
        } else {
            members.remove(&me);
        }
    }

    fn record(&self, call: impl Into<String>) -> Result<()> {
        self.calls.lock().unwrap().push(call.into());
        if self.state.lock().unwrap().authorized {
            Ok(())
        } else {
            Err(Error::Unauthorized {
                status: 401,
                message: "Given token not valid for any token type".into(),
            })
        }
    }
}

fn post(id: i64, author: &str, content: &str, group: Option<GroupId>) -> Post {
    Post {
        id: PostId(id),
        content: content.into(),
        author: UserId(0),
        author_username: author.into(),
        author_profile_photo: None,
        group,
        comments: Vec::new(),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap() + chrono::Duration::minutes(id),
        updated_at: None,
    }
}

fn not_found() -> Error {
    Error::NotFound("No matching object.".into())
}

fn forbidden() -> Error {
    Error::Forbidden("You do not have permission to perform this action.".into())
}

fn rejected(field: &str, message: &str) -> Error {
    let mut fields = FieldErrors::new();
    fields.push(field, message);
    Error::Validation(fields)
}

impl State {
    fn user(&self, username: &str) -> Option<&UserSummary> {
        self.users.iter().find(|u| u.username == username)
    }

    fn group_view(&self, group: &Group) -> Group {
        let members = self.members.get(&group.id).cloned().unwrap_or_default();
        Group {
            member_count: u32::try_from(members.len()).unwrap(),
            is_member: members.contains(&self.me),
            ..group.clone()
        }
    }

    fn profile(&self, username: &str) -> Option<Profile> {
        let user = self.user(username)?;
        let followers = self
            .following
            .values()
            .filter(|set| set.contains(username))
            .count();
        let following = self.following.get(username).map_or(0, HashSet::len);
        Some(Profile {
            id: user.id,
            username: user.username.clone(),
            bio: user.bio.clone(),
            profile_photo: user.profile_photo.clone(),
            follower_count: u32::try_from(followers).unwrap(),
            following_count: u32::try_from(following).unwrap(),
            is_following: self
                .following
                .get(&self.me)
                .is_some_and(|set| set.contains(username)),
        })
    }

    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn newest_first(&self, filter: impl Fn(&Post) -> bool) -> Vec<Post> {
        let mut posts: Vec<_> = self.posts.iter().filter(|p| filter(p)).cloned().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

#[async_trait]
impl SocialApi for FakeApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<Credential> {
        self.calls.lock().unwrap().push("POST /auth/token/".into());
        self.state.lock().unwrap().authorized = true;
        Ok(Credential::new("access").with_refresh("refresh"))
    }

    async fn logout(&self) {
        self.calls.lock().unwrap().push("LOGOUT".into());
    }

    async fn register(&self, _email: &str, _password: &str) -> Result<Acknowledgement> {
        self.calls.lock().unwrap().push("POST /register/".into());
        Ok(Acknowledgement {
            detail: None,
            message: Some("OTP sent to your email.".into()),
        })
    }

    async fn verify_registration(&self, otp: &str) -> Result<Acknowledgement> {
        self.calls.lock().unwrap().push("POST /register/verify/".into());
        if otp == "123456" {
            Ok(Acknowledgement {
                detail: None,
                message: Some("Registration successful.".into()),
            })
        } else {
            Err(rejected("error", "Invalid OTP."))
        }
    }

    async fn current_user(&self) -> Result<CurrentUser> {
        self.record("GET /auth/users/me/")?;
        let state = self.state.lock().unwrap();
        let user = state.user(&state.me).ok_or_else(not_found)?;
        Ok(CurrentUser {
            id: user.id,
            username: user.username.clone(),
            email: Some(format!("{}@college.ac.in", user.username)),
            bio: user.bio.clone(),
            profile_photo: user.profile_photo.clone(),
        })
    }

    async fn update_current_user(&self, update: &ProfileUpdate) -> Result<CurrentUser> {
        self.record("PATCH /auth/users/me/")?;
        {
            let mut state = self.state.lock().unwrap();
            let me = state.me.clone();
            if let Some(user) = state.users.iter_mut().find(|u| u.username == me) {
                user.bio = Some(update.bio.clone());
                if let Some(photo) = &update.photo {
                    user.profile_photo = Some(format!("/media/{}", photo.file_name));
                }
            }
        }
        self.current_user().await
    }

    async fn feed(&self) -> Result<Vec<Post>> {
        self.record("GET /feed/")?;
        let state = self.state.lock().unwrap();
        let mine: HashSet<GroupId> = state
            .members
            .iter()
            .filter(|(_, m)| m.contains(&state.me))
            .map(|(g, _)| *g)
            .collect();
        let followed = state.following.get(&state.me).cloned().unwrap_or_default();
        Ok(state.newest_first(|p| {
            p.author_username == state.me
                || followed.contains(&p.author_username)
                || p.group.is_some_and(|g| mine.contains(&g))
        }))
    }

    async fn posts(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        let query = filter
            .query()
            .into_iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        self.record(format!("GET /posts/?{query}"))?;
        let state = self.state.lock().unwrap();
        Ok(match filter {
            PostFilter::All => state.newest_first(|_| true),
            PostFilter::Group(id) => state.newest_first(|p| p.group == Some(*id)),
            PostFilter::Author(name) => state.newest_first(|p| &p.author_username == name),
        })
    }

    async fn create_post(&self, new: &NewPost) -> Result<Post> {
        self.record("POST /posts/")?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let me = state.me.clone();
        let created = post(id, &me, &new.content, new.group);
        state.posts.push(created.clone());
        Ok(created)
    }

    async fn update_post(&self, id: PostId, content: &str) -> Result<Post> {
        self.record(format!("PATCH /posts/{id}/"))?;
        let mut state = self.state.lock().unwrap();
        let me = state.me.clone();
        let target = state.posts.iter_mut().find(|p| p.id == id).ok_or_else(not_found)?;
        if target.author_username != me {
            return Err(forbidden());
        }
        target.content = content.to_string();
        Ok(target.clone())
    }

    async fn delete_post(&self, id: PostId) -> Result<()> {
        self.record(format!("DELETE /posts/{id}/"))?;
        let mut state = self.state.lock().unwrap();
        let target = state.posts.iter().find(|p| p.id == id).ok_or_else(not_found)?;
        if target.author_username != state.me {
            return Err(forbidden());
        }
        state.posts.retain(|p| p.id != id);
        Ok(())
    }

    async fn add_comment(&self, post: PostId, content: &str) -> Result<Comment> {
        self.record(format!("POST /posts/{post}/comments/"))?;
        let mut state = self.state.lock().unwrap();
        let id = state.next_id();
        let me = state.me.clone();
        let target = state.posts.iter_mut().find(|p| p.id == post).ok_or_else(not_found)?;
        let comment = Comment {
            id: CommentId(id),
            content: content.to_string(),
            author: UserId(1),
            author_username: me,
            post,
            created_at: target.created_at,
        };
        target.comments.push(comment.clone());
        Ok(comment)
    }

    async fn groups(&self) -> Result<Vec<Group>> {
        self.record("GET /groups/")?;
        let state = self.state.lock().unwrap();
        Ok(state.groups.iter().map(|g| state.group_view(g)).collect())
    }

    async fn my_groups(&self) -> Result<Vec<Group>> {
        self.record("GET /my-groups/")?;
        let state = self.state.lock().unwrap();
        Ok(state
            .groups
            .iter()
            .map(|g| state.group_view(g))
            .filter(|g| g.is_member)
            .collect())
    }

    async fn group(&self, id: GroupId) -> Result<Group> {
        self.record(format!("GET /groups/{id}/"))?;
        let state = self.state.lock().unwrap();
        let group = state.groups.iter().find(|g| g.id == id).ok_or_else(not_found)?;
        Ok(state.group_view(group))
    }

    async fn create_group(&self, new: &NewGroup) -> Result<Group> {
        self.record("POST /groups/")?;
        let mut state = self.state.lock().unwrap();
        if state.groups.iter().any(|g| g.name == new.name) {
            return Err(rejected("name", "group with this name already exists."));
        }
        let id = GroupId(state.next_id());
        let me = state.me.clone();
        let group = Group {
            id,
            name: new.name.clone(),
            description: Some(new.description.clone()),
            member_count: 1,
            owner: Some(UserId(1)),
            owner_username: me.clone(),
            is_member: true,
            created_at: None,
        };
        state.groups.push(group.clone());
        state.members.insert(id, HashSet::from([me]));
        Ok(group)
    }

    async fn toggle_membership(&self, id: GroupId) -> Result<MembershipChange> {
        self.record(format!("POST /groups/{id}/toggle_membership/"))?;
        let mut state = self.state.lock().unwrap();
        if !state.groups.iter().any(|g| g.id == id) {
            return Err(not_found());
        }
        let me = state.me.clone();
        let members = state.members.entry(id).or_default();
        let is_member = if members.remove(&me) {
            false
        } else {
            members.insert(me);
            true
        };
        Ok(MembershipChange {
            detail: if is_member { "Joined group." } else { "Left group." }.into(),
            is_member,
        })
    }

    async fn add_member(&self, id: GroupId, username: &str) -> Result<Acknowledgement> {
        self.record(format!("POST /groups/{id}/add_member/"))?;
        let mut state = self.state.lock().unwrap();
        if state.user(username).is_none() {
            return Err(not_found());
        }
        let members = state.members.entry(id).or_default();
        if !members.insert(username.to_string()) {
            return Err(rejected("detail", "User is already a member."));
        }
        Ok(Acknowledgement {
            detail: Some(format!("{username} added to the group.")),
            message: None,
        })
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>> {
        self.record(format!("GET /users/?search={query}"))?;
        let state = self.state.lock().unwrap();
        let needle = query.to_lowercase();
        Ok(state
            .users
            .iter()
            .filter(|u| u.username.contains(&needle))
            .cloned()
            .collect())
    }

    async fn profile(&self, username: &str) -> Result<Profile> {
        self.record(format!("GET /users/{username}/"))?;
        self.state.lock().unwrap().profile(username).ok_or_else(not_found)
    }

    async fn follow(&self, username: &str) -> Result<Acknowledgement> {
        self.record(format!("POST /follow/{username}/"))?;
        let mut state = self.state.lock().unwrap();
        if state.user(username).is_none() {
            return Err(not_found());
        }
        let me = state.me.clone();
        if me == username {
            return Err(rejected("detail", "You cannot follow yourself."));
        }
        if !state.following.entry(me).or_default().insert(username.to_string()) {
            return Err(rejected("detail", "You are already following this user."));
        }
        Ok(Acknowledgement {
            detail: Some(format!("You are now following {username}.")),
            message: None,
        })
    }

    async fn unfollow(&self, username: &str) -> Result<()> {
        self.record(format!("DELETE /follow/{username}/"))?;
        let mut state = self.state.lock().unwrap();
        let me = state.me.clone();
        if state.following.entry(me).or_default().remove(username) {
            Ok(())
        } else {
            Err(not_found())
        }
    }
}
