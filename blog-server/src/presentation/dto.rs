use crate::domain::post::{Post, PostView};
use serde::{Deserialize, Serialize};

/// Fields of the create/edit form. Missing or null fields count as empty.
#[derive(Debug, Default, Deserialize)]
pub struct PostFormRequest {
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl PostFormRequest {
    pub fn author(&self) -> &str {
        self.author.as_deref().unwrap_or_default()
    }

    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn content(&self) -> &str {
        self.content.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Serialize)]
pub struct ListPostsResponse {
    pub posts: Vec<PostView>,
    pub total: usize,
}

impl From<Vec<Post>> for ListPostsResponse {
    fn from(posts: Vec<Post>) -> Self {
        let total = posts.len();
        Self {
            posts: posts.iter().map(PostView::from).collect(),
            total,
        }
    }
}
