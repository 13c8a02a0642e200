//! Content store - resolves slugs to post documents on disk

use lazy_static::lazy_static;
use regex::Regex;
use std::cmp::Ordering;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, Post, PostField, PostFields};
use crate::error::{ContentError, Result};

lazy_static! {
    static ref EXTENSION: Regex = Regex::new(r"\.mdx?$").unwrap();
    static ref SLUG: Regex = Regex::new(r"^[A-Za-z0-9_-][A-Za-z0-9._-]*$").unwrap();
}

/// File extensions recognized as post documents, in lookup order
const EXTENSIONS: [&str; 2] = ["md", "mdx"];

/// A parsed post document
struct Document {
    slug: String,
    header: FrontMatter,
    body: String,
}

impl Document {
    fn newest_first(a: &Document, b: &Document) -> Ordering {
        // dated posts first, newest first, then by slug
        match (a.header.date(), b.header.date()) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
        .then_with(|| a.slug.cmp(&b.slug))
    }
}

/// Flat directory of post documents, one file per post
#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    /// Create a store over the given directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Strip a trailing `.md` / `.mdx` from a requested identifier
    pub fn normalize_slug(slug: &str) -> String {
        EXTENSION.replace(slug, "").into_owned()
    }

    /// Load the requested fields of one post.
    ///
    /// Fails with `NotFound` when no document matches the slug and with
    /// `Parse` when its header is malformed.
    pub fn get_post_by_slug(&self, slug: &str, fields: &[PostField]) -> Result<PostFields> {
        let doc = self.read_document(slug)?;
        Ok(PostFields::select(&doc.slug, &doc.header, &doc.body, fields))
    }

    /// Load one post with every field
    pub fn load_post(&self, slug: &str) -> Result<Post> {
        let doc = self.read_document(slug)?;
        Ok(Post::from_document(&doc.slug, &doc.header, &doc.body))
    }

    /// Slugs of every document in the store, sorted
    pub fn slugs(&self) -> Result<Vec<String>> {
        if !self.root.is_dir() {
            tracing::warn!("Content directory {:?} does not exist", self.root);
            return Ok(Vec::new());
        }

        let mut slugs = Vec::new();
        for entry in WalkDir::new(&self.root).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::new(ErrorKind::Other, "walk error"))
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_post_file(path) {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|s| s.to_str()) else {
                tracing::warn!("Skipping non UTF-8 file name {:?}", path);
                continue;
            };
            let slug = Self::normalize_slug(file_name);
            if !SLUG.is_match(&slug) {
                tracing::warn!("Skipping {:?}: file name is not a valid slug", path);
                continue;
            }
            slugs.push(slug);
        }

        slugs.sort();
        slugs.dedup();
        Ok(slugs)
    }

    /// Load every active post's requested fields, newest first.
    ///
    /// The activation flag and date are read for filtering and ordering even
    /// when they are not among `fields`. Equal or missing dates are ordered by
    /// slug, undated posts last.
    pub fn get_all_posts(&self, fields: &[PostField]) -> Result<Vec<PostFields>> {
        Ok(self
            .active_documents()?
            .iter()
            .map(|doc| PostFields::select(&doc.slug, &doc.header, &doc.body, fields))
            .collect())
    }

    /// Load every active post, newest first
    pub fn load_active_posts(&self) -> Result<Vec<Post>> {
        Ok(self
            .active_documents()?
            .iter()
            .map(|doc| Post::from_document(&doc.slug, &doc.header, &doc.body))
            .collect())
    }

    fn active_documents(&self) -> Result<Vec<Document>> {
        let mut docs = Vec::new();
        for slug in self.slugs()? {
            let doc = self.read_document(&slug)?;
            if doc.header.is_active() {
                docs.push(doc);
            } else {
                tracing::debug!("Skipping inactive post {}", slug);
            }
        }
        docs.sort_by(Document::newest_first);
        Ok(docs)
    }

    fn read_document(&self, slug: &str) -> Result<Document> {
        let slug = Self::normalize_slug(slug);
        if !SLUG.is_match(&slug) {
            return Err(ContentError::not_found(slug));
        }

        let path = self.locate(&slug)?;
        let content = fs::read_to_string(&path)?;
        let (header, body) = FrontMatter::parse(&content, &path)?;
        tracing::debug!("Loaded post {} from {:?}", slug, path);

        Ok(Document {
            body: body.to_string(),
            slug,
            header,
        })
    }

    fn locate(&self, slug: &str) -> Result<PathBuf> {
        EXTENSIONS
            .iter()
            .map(|ext| self.root.join(format!("{}.{}", slug, ext)))
            .find(|path| path.is_file())
            .ok_or_else(|| ContentError::not_found(slug))
    }
}

/// Check if a file is a post document
fn is_post_file(path: &Path) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with('.'))
        .unwrap_or(true);
    !hidden
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| EXTENSIONS.contains(&e))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_post(dir: &Path, file: &str, header: &str, body: &str) {
        let content = format!("---\n{}\n---\n\n{}", header, body);
        fs::write(dir.join(file), content).unwrap();
    }

    fn store_with_posts() -> (TempDir, ContentStore) {
        let tmp = TempDir::new().unwrap();
        write_post(
            tmp.path(),
            "old-post.md",
            "title: Old\ndescription: First\nactive: true\ndate: 2024-01-01",
            "Old body",
        );
        write_post(
            tmp.path(),
            "hidden-draft.md",
            "title: Draft\nactive: false\ndate: 2024-06-01",
            "Draft body",
        );
        write_post(
            tmp.path(),
            "new-post.mdx",
            "title: New\nactive: true\ndate: 2025-01-01",
            "New body",
        );
        let store = ContentStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn test_normalize_slug() {
        assert_eq!(ContentStore::normalize_slug("post.md"), "post");
        assert_eq!(ContentStore::normalize_slug("post.mdx"), "post");
        assert_eq!(ContentStore::normalize_slug("post"), "post");
        assert_eq!(ContentStore::normalize_slug("post.md.md"), "post.md");
        assert_eq!(ContentStore::normalize_slug("notes.markdown"), "notes.markdown");
    }

    #[test]
    fn test_get_post_by_slug() {
        let (_tmp, store) = store_with_posts();
        let fields = store
            .get_post_by_slug("old-post", &[PostField::Title, PostField::Description])
            .unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get_str(PostField::Title), Some("Old"));
        assert_eq!(fields.get_str(PostField::Description), Some("First"));
    }

    #[test]
    fn test_get_post_with_extension_suffix() {
        let (_tmp, store) = store_with_posts();
        let fields = store
            .get_post_by_slug("old-post.md", &[PostField::Slug, PostField::Content])
            .unwrap();
        assert_eq!(fields.get_str(PostField::Slug), Some("old-post"));
        assert_eq!(fields.get_str(PostField::Content), Some("Old body"));
    }

    #[test]
    fn test_mdx_lookup() {
        let (_tmp, store) = store_with_posts();
        let post = store.load_post("new-post").unwrap();
        assert_eq!(post.title, "New");
        assert_eq!(post.body, "New body");
    }

    #[test]
    fn test_missing_post_is_not_found() {
        let (_tmp, store) = store_with_posts();
        let err = store.get_post_by_slug("nope", &[PostField::Title]).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_path_traversal_is_not_found() {
        let (_tmp, store) = store_with_posts();
        for slug in ["../secret", "a/b", "", ".hidden", "..", "with space"] {
            let err = store.load_post(slug).unwrap_err();
            assert!(err.is_not_found(), "slug {:?}", slug);
        }
    }

    #[test]
    fn test_malformed_header_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("broken.md"), "---\ntitle: [oops\n---\nBody").unwrap();
        let store = ContentStore::new(tmp.path());
        let err = store.get_post_by_slug("broken", &[PostField::Title]).unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }

    #[test]
    fn test_slugs_skip_non_posts() {
        let (tmp, store) = store_with_posts();
        fs::write(tmp.path().join("notes.txt"), "not a post").unwrap();
        fs::write(tmp.path().join(".draft.md"), "---\nactive: true\n---\n").unwrap();
        fs::create_dir(tmp.path().join("nested")).unwrap();
        fs::write(tmp.path().join("nested/inner.md"), "---\nactive: true\n---\n").unwrap();

        let slugs = store.slugs().unwrap();
        assert_eq!(slugs, vec!["hidden-draft", "new-post", "old-post"]);
    }

    #[test]
    fn test_slugs_of_missing_dir() {
        let store = ContentStore::new("/nonexistent/content/dir");
        assert!(store.slugs().unwrap().is_empty());
    }

    #[test]
    fn test_listing_filters_and_orders() {
        let (_tmp, store) = store_with_posts();
        let posts = store
            .get_all_posts(&[PostField::Slug, PostField::Date])
            .unwrap();
        let slugs: Vec<_> = posts
            .iter()
            .map(|p| p.get_str(PostField::Slug).unwrap())
            .collect();
        assert_eq!(slugs, vec!["new-post", "old-post"]);
    }

    #[test]
    fn test_listing_without_active_field_requested() {
        let (_tmp, store) = store_with_posts();
        let posts = store.get_all_posts(&[PostField::Title]).unwrap();
        assert_eq!(posts.len(), 2);
        assert!(posts.iter().all(|p| p.len() == 1));
    }

    #[test]
    fn test_listing_tie_break_by_slug() {
        let tmp = TempDir::new().unwrap();
        write_post(tmp.path(), "b.md", "active: true\ndate: 2024-01-01", "");
        write_post(tmp.path(), "a.md", "active: true\ndate: 2024-01-01", "");
        write_post(tmp.path(), "c.md", "active: true", "");
        write_post(tmp.path(), "d.md", "active: true\ndate: 2023-01-01", "");
        let store = ContentStore::new(tmp.path());

        let slugs: Vec<_> = store
            .load_active_posts()
            .unwrap()
            .into_iter()
            .map(|p| p.slug)
            .collect();
        assert_eq!(slugs, vec!["a", "b", "d", "c"]);
    }

    #[test]
    fn test_listing_propagates_parse_error() {
        let (tmp, store) = store_with_posts();
        fs::write(tmp.path().join("broken.md"), "---\n- a\n- b\n---\n").unwrap();
        let err = store.get_all_posts(&[PostField::Slug]).unwrap_err();
        assert!(matches!(err, ContentError::Parse { .. }));
    }
}
