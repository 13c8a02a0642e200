//! Post model and field selection

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::FrontMatter;
use crate::helpers::encode_segment;

/// A field a caller can request from the content store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostField {
    /// Computed from the file name
    Slug,
    Title,
    Description,
    Image,
    /// Computed from the body
    Content,
    Active,
    Date,
}

impl PostField {
    pub const ALL: [PostField; 7] = [
        PostField::Slug,
        PostField::Title,
        PostField::Description,
        PostField::Image,
        PostField::Content,
        PostField::Active,
        PostField::Date,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Slug => "slug",
            Self::Title => "title",
            Self::Description => "description",
            Self::Image => "image",
            Self::Content => "content",
            Self::Active => "active",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for PostField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown post field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for PostField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// The requested subset of a post, keyed by field.
///
/// Holds only fields that exist: header-backed fields are absent when the
/// header does not define them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PostFields {
    values: IndexMap<PostField, Value>,
}

impl PostFields {
    /// Pick `requested` fields out of a parsed document
    pub fn select(slug: &str, header: &FrontMatter, body: &str, requested: &[PostField]) -> Self {
        let mut values = IndexMap::new();

        for &field in requested {
            let value = match field {
                PostField::Slug => Some(Value::String(slug.to_string())),
                PostField::Content => Some(Value::String(body.to_string())),
                other => header.get(other.as_str()).cloned(),
            };
            if let Some(value) = value {
                values.insert(field, value);
            }
        }

        Self { values }
    }

    pub fn get(&self, field: PostField) -> Option<&Value> {
        self.values.get(&field)
    }

    pub fn get_str(&self, field: PostField) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn contains(&self, field: PostField) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Present fields in request order
    pub fn fields(&self) -> impl Iterator<Item = PostField> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PostField, &Value)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

/// A blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    /// URL-safe identifier, equal to the source file stem
    pub slug: String,

    /// Post title, the slug when the header has none
    pub title: String,

    pub description: String,

    /// Cover image file name under `/images/blogs/<slug>/`
    pub image: Option<String>,

    /// Raw markdown body
    pub body: String,

    pub active: bool,

    /// Publish date
    pub date: Option<NaiveDateTime>,
}

impl Post {
    /// Build a post from a parsed document
    pub fn from_document(slug: &str, header: &FrontMatter, body: &str) -> Self {
        Self {
            slug: slug.to_string(),
            title: header.title().unwrap_or(slug).to_string(),
            description: header.description().unwrap_or_default().to_string(),
            image: header
                .image()
                .filter(|image| !image.trim().is_empty())
                .map(str::to_string),
            body: body.to_string(),
            active: header.is_active(),
            date: header.date(),
        }
    }

    /// Site-relative URL of the cover image
    pub fn cover_image_path(&self) -> Option<String> {
        self.image
            .as_ref()
            .map(|image| format!("/images/blogs/{}/{}", self.slug, encode_segment(image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn header(yaml: &str) -> FrontMatter {
        let doc = format!("---\n{}\n---\n", yaml);
        FrontMatter::parse(&doc, Path::new("test.md")).unwrap().0
    }

    #[test]
    fn test_field_from_str() {
        assert_eq!("title".parse::<PostField>(), Ok(PostField::Title));
        assert_eq!("content".parse::<PostField>(), Ok(PostField::Content));
        assert_eq!(
            "author".parse::<PostField>(),
            Err(UnknownField("author".to_string()))
        );
        for field in PostField::ALL {
            assert_eq!(field.as_str().parse::<PostField>(), Ok(field));
        }
    }

    #[test]
    fn test_select_only_requested() {
        let fm = header("title: T\ndescription: D\nimage: i.png\nactive: true");
        let fields = PostFields::select("slug-a", &fm, "Body", &[PostField::Slug, PostField::Title]);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get_str(PostField::Slug), Some("slug-a"));
        assert_eq!(fields.get_str(PostField::Title), Some("T"));
        assert!(!fields.contains(PostField::Description));
    }

    #[test]
    fn test_select_omits_absent_header_fields() {
        let fm = header("title: Only a title");
        let fields = PostFields::select(
            "slug-b",
            &fm,
            "Body text",
            &[PostField::Title, PostField::Image, PostField::Content, PostField::Date],
        );
        assert_eq!(
            fields.fields().collect::<Vec<_>>(),
            vec![PostField::Title, PostField::Content]
        );
        assert_eq!(fields.get_str(PostField::Content), Some("Body text"));
    }

    #[test]
    fn test_select_keeps_header_value_types() {
        let fm = header("active: true");
        let fields = PostFields::select("s", &fm, "", &[PostField::Active]);
        assert_eq!(fields.get(PostField::Active), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_fields_serialize_as_map() {
        let fm = header("title: T");
        let fields = PostFields::select("s", &fm, "", &[PostField::Slug, PostField::Title]);
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(json, r#"{"slug":"s","title":"T"}"#);
    }

    #[test]
    fn test_post_from_document() {
        let fm = header("title: Attention\nimage: cover.png\nactive: true\ndate: 2024-06-01");
        let post = Post::from_document("attention", &fm, "Body");
        assert_eq!(post.title, "Attention");
        assert_eq!(post.description, "");
        assert!(post.active);
        assert!(post.date.is_some());
        assert_eq!(
            post.cover_image_path().as_deref(),
            Some("/images/blogs/attention/cover.png")
        );
    }

    #[test]
    fn test_empty_image_is_no_cover() {
        let post = Post::from_document("s", &header("image: ''"), "");
        assert!(post.cover_image_path().is_none());
    }

    #[test]
    fn test_post_title_falls_back_to_slug() {
        let post = Post::from_document("untitled-draft", &FrontMatter::default(), "");
        assert_eq!(post.title, "untitled-draft");
        assert!(!post.active);
        assert!(post.cover_image_path().is_none());
    }
}
