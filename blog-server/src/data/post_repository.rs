use std::sync::Arc;

use tracing::{error, info};

use crate::data::post_store::PostStore;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostDraft, find_index_by_id, next_id};

/// Load/modify/save operations over the whole post collection.
///
/// Every mutation reads the full document, changes it in memory and writes
/// it back. There is no locking: two concurrent mutations race and the
/// later write wins.
#[derive(Clone)]
pub struct PostRepository {
    store: Arc<dyn PostStore>,
}

impl PostRepository {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub async fn load(&self) -> Result<Vec<Post>, DomainError> {
        match self.store.read().await? {
            Some(document) => serde_json::from_slice(&document).map_err(|e| {
                error!("failed to parse posts document: {}", e);
                DomainError::from(e)
            }),
            None => Ok(Vec::new()),
        }
    }

    pub async fn save(&self, posts: &[Post]) -> Result<(), DomainError> {
        let document = serde_json::to_vec_pretty(posts)
            .map_err(|e| DomainError::Internal(format!("serialization error: {}", e)))?;
        self.store.write(&document).await
    }

    pub async fn find_by_id(&self, id: u64) -> Result<Option<Post>, DomainError> {
        let posts = self.load().await?;
        Ok(find_index_by_id(&posts, id).map(|idx| posts[idx].clone()))
    }

    /// Validates and appends a new post with the next free id.
    pub async fn add(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let draft = draft.validate(None)?;
        let mut posts = self.load().await?;
        let id = next_id(&posts).ok_or_else(|| {
            error!("cannot assign an id above {}", u64::MAX);
            DomainError::Storage("post ids exhausted".to_string())
        })?;
        let post = Post::new(id, draft);
        posts.push(post.clone());
        self.save(&posts).await?;

        info!(post_id = post.id, author = %post.author, "post created");
        Ok(post)
    }

    /// `Ok(None)` when no post has this id. The lookup happens before
    /// validation, so an unknown id wins over an incomplete form.
    pub async fn update(&self, id: u64, draft: PostDraft) -> Result<Option<Post>, DomainError> {
        let mut posts = self.load().await?;
        let Some(idx) = find_index_by_id(&posts, id) else {
            return Ok(None);
        };
        let draft = draft.validate(Some(&posts[idx]))?;
        posts[idx].apply(draft);
        self.save(&posts).await?;

        info!(post_id = id, "post updated");
        Ok(Some(posts[idx].clone()))
    }

    /// Returns whether a post was removed; an unknown id leaves the store
    /// untouched.
    pub async fn remove(&self, id: u64) -> Result<bool, DomainError> {
        let mut posts = self.load().await?;
        let Some(idx) = find_index_by_id(&posts, id) else {
            return Ok(false);
        };
        posts.remove(idx);
        self.save(&posts).await?;

        info!(post_id = id, "post deleted");
        Ok(true)
    }

    /// Returns the new like count, or `None` for an unknown id.
    pub async fn increment_like(&self, id: u64) -> Result<Option<u64>, DomainError> {
        let mut posts = self.load().await?;
        let Some(idx) = find_index_by_id(&posts, id) else {
            return Ok(None);
        };
        let likes = posts[idx].likes().saturating_add(1);
        posts[idx].set_likes(likes);
        self.save(&posts).await?;

        info!(post_id = id, likes, "post liked");
        Ok(Some(likes))
    }
}
