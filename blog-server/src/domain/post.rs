use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::error::{DomainError, Rejected};

pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all fields.";

/// A post as it is stored. Fields this type does not know about and the raw
/// likes value are carried through untouched, so saving the collection does
/// not rewrite posts an operation never targeted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(
        default,
        deserialize_with = "deserialize_raw",
        skip_serializing_if = "Option::is_none"
    )]
    likes: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Post {
    pub fn new(id: u64, draft: PostDraft) -> Self {
        Self {
            id,
            author: draft.author,
            title: draft.title,
            content: draft.content,
            likes: Some(Value::from(0u64)),
            extra: Map::new(),
        }
    }

    /// Stored like count, zero when missing or not integer-like.
    pub fn likes(&self) -> u64 {
        self.likes.as_ref().map_or(0, coerce_likes)
    }

    pub fn set_likes(&mut self, likes: u64) {
        self.likes = Some(Value::from(likes));
    }

    /// Replaces the editable fields, leaving `id` and `likes` alone.
    pub fn apply(&mut self, draft: PostDraft) {
        self.author = draft.author;
        self.title = draft.title;
        self.content = draft.content;
    }

    pub fn merged_with(&self, draft: &PostDraft) -> Post {
        let mut post = self.clone();
        post.apply(draft.clone());
        post
    }
}

/// The public shape of a post, with likes already coerced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostView {
    pub id: u64,
    pub author: String,
    pub title: String,
    pub content: String,
    pub likes: u64,
}

impl From<&Post> for PostView {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id,
            author: post.author.clone(),
            title: post.title.clone(),
            content: post.content.clone(),
            likes: post.likes(),
        }
    }
}

impl From<Post> for PostView {
    fn from(post: Post) -> Self {
        PostView::from(&post)
    }
}

/// The user-editable part of a post, trimmed on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub author: String,
    pub title: String,
    pub content: String,
}

impl PostDraft {
    pub fn new(author: &str, title: &str, content: &str) -> Self {
        Self {
            author: author.trim().to_owned(),
            title: title.trim().to_owned(),
            content: content.trim().to_owned(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.author.is_empty() && !self.title.is_empty() && !self.content.is_empty()
    }

    /// Returns the draft unchanged if every field is filled in, otherwise a
    /// validation error carrying the submitted values (and the original post
    /// merged with them, when editing).
    pub fn validate(self, original: Option<&Post>) -> Result<Self, DomainError> {
        if self.is_complete() {
            return Ok(self);
        }
        let post = original.map(|post| PostView::from(post.merged_with(&self)));
        Err(DomainError::Validation(Box::new(Rejected {
            message: MISSING_FIELDS_MESSAGE.to_owned(),
            form: self,
            post,
        })))
    }
}

/// One past the highest id, or 1 for an empty collection. `None` once the
/// highest id is `u64::MAX`.
pub fn next_id(posts: &[Post]) -> Option<u64> {
    match posts.iter().map(|p| p.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

pub fn find_index_by_id(posts: &[Post], id: u64) -> Option<usize> {
    posts.iter().position(|p| p.id == id)
}

/// Interprets a stored likes value, falling back to zero for anything that
/// is not integer-like.
pub fn coerce_likes(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite() && *f >= 0.0)
                    .map(|f| f.trunc() as u64)
            })
            .unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        Value::Bool(b) => u64::from(*b),
        _ => 0,
    }
}

// Keeps an explicit `null` as `Some(Value::Null)` so it is written back as-is.
fn deserialize_raw<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post(id: u64) -> Post {
        Post::new(id, PostDraft::new("a", "t", "c"))
    }

    #[test]
    fn next_id_starts_at_one() {
        assert_eq!(next_id(&[]), Some(1));
    }

    #[test]
    fn next_id_follows_the_highest_id() {
        assert_eq!(next_id(&[post(1), post(3)]), Some(4));
        assert_eq!(next_id(&[post(7), post(2)]), Some(8));
    }

    #[test]
    fn next_id_is_exhausted_at_u64_max() {
        assert_eq!(next_id(&[post(1), post(u64::MAX)]), None);
    }

    #[test]
    fn find_index_by_id_returns_position() {
        let posts = vec![post(5), post(2), post(9)];
        assert_eq!(find_index_by_id(&posts, 2), Some(1));
        assert_eq!(find_index_by_id(&posts, 4), None);
    }

    #[test]
    fn draft_fields_are_trimmed() {
        let draft = PostDraft::new("  Ann ", "\tHello\n", " body ");
        assert_eq!(draft.author, "Ann");
        assert_eq!(draft.title, "Hello");
        assert_eq!(draft.content, "body");
        assert!(draft.is_complete());
    }

    #[test]
    fn whitespace_only_field_fails_validation() {
        let err = PostDraft::new("Ann", "   ", "body")
            .validate(None)
            .unwrap_err();
        match err {
            DomainError::Validation(rejected) => {
                assert_eq!(rejected.message, MISSING_FIELDS_MESSAGE);
                assert_eq!(rejected.form.author, "Ann");
                assert_eq!(rejected.form.title, "");
                assert!(rejected.post.is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn rejected_edit_keeps_id_and_likes_of_original() {
        let mut original = post(3);
        original.set_likes(4);
        let err = PostDraft::new("", "new title", "new body")
            .validate(Some(&original))
            .unwrap_err();
        let DomainError::Validation(rejected) = err else {
            panic!("expected validation error");
        };
        let merged = rejected.post.unwrap();
        assert_eq!(merged.id, 3);
        assert_eq!(merged.likes, 4);
        assert_eq!(merged.author, "");
        assert_eq!(merged.title, "new title");
    }

    #[test]
    fn likes_are_coerced_when_counted() {
        let raw = json!([
            {"id": 1, "author": "a", "title": "t", "content": "c"},
            {"id": 2, "author": "a", "title": "t", "content": "c", "likes": "12"},
            {"id": 3, "author": "a", "title": "t", "content": "c", "likes": "lots"},
            {"id": 4, "author": "a", "title": "t", "content": "c", "likes": null},
            {"id": 5, "author": "a", "title": "t", "content": "c", "likes": 2.9},
            {"id": 6, "author": "a", "title": "t", "content": "c", "likes": -3},
            {"id": 7, "author": "a", "title": "t", "content": "c", "likes": [1]}
        ]);
        let posts: Vec<Post> = serde_json::from_value(raw).unwrap();
        let likes: Vec<u64> = posts.iter().map(Post::likes).collect();
        assert_eq!(likes, vec![0, 12, 0, 0, 2, 0, 0]);
    }

    #[test]
    fn stored_record_is_written_back_unchanged() {
        let raw = json!({
            "id": 1, "author": "a", "title": "t", "content": "c",
            "likes": "7x", "tags": ["keep"]
        });
        let post: Post = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(post.likes(), 0);
        assert_eq!(serde_json::to_value(&post).unwrap(), raw);

        let raw = json!({"id": 2, "author": "a", "title": "t", "content": "c", "likes": null});
        let post: Post = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(serde_json::to_value(&post).unwrap(), raw);
    }

    #[test]
    fn missing_text_fields_load_as_empty() {
        let post: Post = serde_json::from_value(json!({"id": 1, "title": "t", "likes": 0})).unwrap();
        assert_eq!(post.author, "");
        assert_eq!(post.content, "");
        assert_eq!(post.title, "t");
    }

    #[test]
    fn view_exposes_coerced_likes() {
        let post: Post = serde_json::from_value(
            json!({"id": 1, "author": "a", "title": "t", "content": "c", "likes": "5", "x": 1}),
        )
        .unwrap();
        assert_eq!(
            serde_json::to_value(PostView::from(&post)).unwrap(),
            json!({"id": 1, "author": "a", "title": "t", "content": "c", "likes": 5})
        );
    }

    #[test]
    fn apply_leaves_id_and_likes() {
        let mut p = post(2);
        p.set_likes(10);
        p.apply(PostDraft::new("b", "u", "d"));
        assert_eq!((p.id, p.likes()), (2, 10));
        assert_eq!(p.author, "b");
    }
}
