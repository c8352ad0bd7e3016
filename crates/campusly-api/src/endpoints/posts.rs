//! Feed, post and comment endpoints.

use reqwest::Method;

use crate::client::{ApiClient, Call};
use crate::error::Result;
use crate::model::{Comment, NewPost, Post, PostFilter, PostId};

impl ApiClient {
    /// Fetches the personal aggregated feed.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn feed(&self) -> Result<Vec<Post>> {
        self.json(Call::get(&["feed"])).await
    }

    /// Lists posts matching a filter.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn posts(&self, filter: &PostFilter) -> Result<Vec<Post>> {
        let query = filter.query();
        self.json(Call::get(&["posts"]).with_query(&query)).await
    }

    /// Creates a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn create_post(&self, post: &NewPost) -> Result<Post> {
        let body = serde_json::to_value(post)?;
        self.json(Call::post(&["posts"], &body)).await
    }

    /// Replaces a post's content.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn update_post(&self, id: PostId, content: &str) -> Result<Post> {
        let id = id.to_string();
        let body = serde_json::json!({ "content": content });
        self.json(Call::post(&["posts", id.as_str()], &body).with_method(Method::PATCH))
            .await
    }

    /// Deletes a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_post(&self, id: PostId) -> Result<()> {
        let id = id.to_string();
        self.empty(Call::get(&["posts", id.as_str()]).with_method(Method::DELETE))
            .await
    }

    /// Adds a comment to a post.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn add_comment(&self, post: PostId, content: &str) -> Result<Comment> {
        let id = post.to_string();
        let body = serde_json::json!({ "content": content });
        self.json(Call::post(&["posts", id.as_str(), "comments"], &body))
            .await
    }
}
