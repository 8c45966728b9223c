//! Post data model.
//!
//! A [`Post`] is the unit the filter engine works on. Posts are owned by the
//! data source; the engine only ever reads them.

use serde::{Deserialize, Serialize};

/// A content item that can be searched and filtered by tag.
///
/// `description`, `body` and `tags` default to empty when absent from the
/// serialized form, so a post always has every field defined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Post title.
    pub title: String,

    /// Short summary shown alongside the title.
    #[serde(default)]
    pub description: String,

    /// Full body text.
    #[serde(default)]
    pub body: String,

    /// Tags attached to the post. Duplicates are not allowed within a post.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Post {
    /// Creates a post with the given title and empty text fields.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            body: String::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the body text.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Sets the tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if the post carries the given tag (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// On-disk shape of a post collection.
///
/// Both a bare JSON array of posts and an object with a `posts` field are
/// accepted. Saving always writes the object form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PostCollection {
    /// The posts, in source order.
    #[serde(default)]
    pub posts: Vec<Post>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PostCollectionRepr {
    Bare(Vec<Post>),
    Wrapped {
        #[serde(default)]
        posts: Vec<Post>,
    },
}

impl PostCollection {
    /// Creates a collection from a list of posts.
    pub fn new(posts: Vec<Post>) -> Self {
        Self { posts }
    }

    /// Parses a collection from JSON, accepting either supported shape.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let repr: PostCollectionRepr = serde_json::from_str(json)?;
        let posts = match repr {
            PostCollectionRepr::Bare(posts) => posts,
            PostCollectionRepr::Wrapped { posts } => posts,
        };
        Ok(Self { posts })
    }

    /// Returns the number of posts.
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Returns true if the collection has no posts.
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

impl From<Vec<Post>> for PostCollection {
    fn from(posts: Vec<Post>) -> Self {
        Self::new(posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_builder() {
        let post = Post::new("Go Basics")
            .with_description("Intro")
            .with_body("package main")
            .with_tags(["go", "backend"]);

        assert_eq!(post.title, "Go Basics");
        assert_eq!(post.description, "Intro");
        assert_eq!(post.body, "package main");
        assert_eq!(post.tags, vec!["go", "backend"]);
    }

    #[test]
    fn test_post_has_tag_is_exact() {
        let post = Post::new("t").with_tags(["Rust"]);
        assert!(post.has_tag("Rust"));
        assert!(!post.has_tag("rust"));
        assert!(!post.has_tag("Rus"));
    }

    #[test]
    fn test_post_deserialize_minimal() {
        let post: Post = serde_json::from_str(r#"{"title": "Only a title"}"#).unwrap();
        assert_eq!(post.title, "Only a title");
        assert!(post.description.is_empty());
        assert!(post.body.is_empty());
        assert!(post.tags.is_empty());
    }

    #[test]
    fn test_collection_from_bare_array() {
        let json = r#"[{"title": "A", "tags": ["x"]}, {"title": "B"}]"#;
        let collection = PostCollection::from_json(json).unwrap();
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.posts[0].tags, vec!["x"]);
    }

    #[test]
    fn test_collection_from_wrapped_object() {
        let json = r#"{"posts": [{"title": "A"}]}"#;
        let collection = PostCollection::from_json(json).unwrap();
        assert_eq!(collection.len(), 1);
        assert_eq!(collection.posts[0].title, "A");
    }

    #[test]
    fn test_collection_from_empty_object() {
        let collection = PostCollection::from_json("{}").unwrap();
        assert!(collection.is_empty());
    }

    #[test]
    fn test_collection_rejects_post_without_title() {
        let result = PostCollection::from_json(r#"[{"body": "no title"}]"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_collection_serializes_wrapped_form() {
        let collection = PostCollection::new(vec![Post::new("A")]);
        let json = serde_json::to_string(&collection).unwrap();
        assert!(json.starts_with(r#"{"posts":"#));
    }
}
