use std::sync::Arc;

use crate::data::post_repository::PostRepository;
use crate::domain::{
    error::DomainError,
    post::{Post, PostDraft},
};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct PostService {
    repo: Arc<PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<PostRepository>) -> Self {
        Self { repo }
    }

    pub async fn get_post(&self, id: u64) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::PostNotFound(id))
    }

    pub async fn get_posts(&self) -> Result<Vec<Post>, DomainError> {
        self.repo.load().await
    }

    #[instrument(skip(self, content))]
    pub async fn create_post(
        &self,
        author: &str,
        title: &str,
        content: &str,
    ) -> Result<Post, DomainError> {
        self.repo.add(PostDraft::new(author, title, content)).await
    }

    #[instrument(skip(self, content))]
    pub async fn update_post(
        &self,
        post_id: u64,
        author: &str,
        title: &str,
        content: &str,
    ) -> Result<Post, DomainError> {
        self.repo
            .update(post_id, PostDraft::new(author, title, content))
            .await?
            .ok_or(DomainError::PostNotFound(post_id))
    }

    /// Unknown ids are ignored.
    #[instrument(skip(self))]
    pub async fn delete_post(&self, post_id: u64) -> Result<(), DomainError> {
        if !self.repo.remove(post_id).await? {
            debug!(post_id, "delete ignored, no such post");
        }
        Ok(())
    }

    /// Unknown ids are ignored.
    #[instrument(skip(self))]
    pub async fn like_post(&self, post_id: u64) -> Result<Option<u64>, DomainError> {
        let likes = self.repo.increment_like(post_id).await?;
        if likes.is_none() {
            debug!(post_id, "like ignored, no such post");
        }
        Ok(likes)
    }
}
