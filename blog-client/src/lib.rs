use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

mod error;
mod http_client;

pub use error::BlogClientError;
pub use http_client::BlogClientHttp;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    pub author: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub likes: u64,
}

impl fmt::Display for Post {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "#{} {} (by {}, {} likes)", self.id, self.title, self.author, self.likes)?;
        write!(f, "{}", self.content)
    }
}

/// Form values as the server echoes them back on a rejected create or edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

#[async_trait]
pub trait BlogClient {
    async fn list_posts(&self) -> Result<Vec<Post>, BlogClientError>;
    async fn get_post(&self, id: u64) -> Result<Post, BlogClientError>;
    async fn create_post(&self, form: &PostForm) -> Result<Post, BlogClientError>;
    async fn update_post(&self, id: u64, form: &PostForm) -> Result<Post, BlogClientError>;
    /// Succeeds whether or not the post existed.
    async fn delete_post(&self, id: u64) -> Result<(), BlogClientError>;
    /// Succeeds whether or not the post existed.
    async fn like_post(&self, id: u64) -> Result<(), BlogClientError>;
}
