use crate::error::BlogClientError;
use crate::{BlogClient, Post, PostForm};
use async_trait::async_trait;
use reqwest::redirect::Policy;
use reqwest::{Client, Response};
use serde::Deserialize;

#[derive(Clone)]
pub struct BlogClientHttp {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct PostsResponse {
    posts: Vec<Post>,
}

impl BlogClientHttp {
    pub fn connect(endpoint: &str) -> Result<Self, BlogClientError> {
        let base_url = endpoint.trim_end_matches('/').to_string();
        // Delete and like answer with a redirect to the list; the client
        // treats that as success instead of following it.
        let client = Client::builder().redirect(Policy::none()).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self) -> String {
        format!("{}/api/posts", self.base_url)
    }

    fn post_url(&self, id: u64) -> String {
        format!("{}/api/posts/{}", self.base_url, id)
    }

    async fn expect_post(resp: Response) -> Result<Post, BlogClientError> {
        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            Err(BlogClientError::from_http_response(resp).await)
        }
    }

    async fn expect_redirect(resp: Response) -> Result<(), BlogClientError> {
        if resp.status().is_success() || resp.status().is_redirection() {
            Ok(())
        } else {
            Err(BlogClientError::from_http_response(resp).await)
        }
    }
}

#[async_trait]
impl BlogClient for BlogClientHttp {
    async fn list_posts(&self) -> Result<Vec<Post>, BlogClientError> {
        let resp = self.client.get(self.posts_url()).send().await?;

        if resp.status().is_success() {
            let posts: PostsResponse = resp.json().await?;
            Ok(posts.posts)
        } else {
            Err(BlogClientError::from_http_response(resp).await)
        }
    }

    async fn get_post(&self, id: u64) -> Result<Post, BlogClientError> {
        let resp = self.client.get(self.post_url(id)).send().await?;
        Self::expect_post(resp).await
    }

    async fn create_post(&self, form: &PostForm) -> Result<Post, BlogClientError> {
        let resp = self.client.post(self.posts_url()).json(form).send().await?;
        Self::expect_post(resp).await
    }

    async fn update_post(&self, id: u64, form: &PostForm) -> Result<Post, BlogClientError> {
        let resp = self.client.put(self.post_url(id)).json(form).send().await?;
        Self::expect_post(resp).await
    }

    async fn delete_post(&self, id: u64) -> Result<(), BlogClientError> {
        let resp = self.client.delete(self.post_url(id)).send().await?;
        Self::expect_redirect(resp).await
    }

    async fn like_post(&self, id: u64) -> Result<(), BlogClientError> {
        let resp = self
            .client
            .post(format!("{}/like", self.post_url(id)))
            .send()
            .await?;
        Self::expect_redirect(resp).await
    }
}
