//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Create `<content_dir>/<slug>.md` with a filled-in header.
///
/// The slug defaults to the slugified title. Drafts are written inactive.
pub fn create_post(folio: &Folio, title: &str, slug: Option<&str>, draft: bool) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => slug::slugify(s),
        None => slug::slugify(title),
    };
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a slug from {:?}", title);
    }

    fs::create_dir_all(&folio.content_dir)?;

    let file_path = folio.content_dir.join(format!("{}.md", slug));
    let existing = folio.store().slugs()?;
    if file_path.exists() || existing.contains(&slug) {
        anyhow::bail!("Post already exists: {}", slug);
    }

    let now = chrono::Local::now();
    let content = format!(
        "---\ntitle: {}\ndescription: ''\nimage: ''\nactive: {}\ndate: {}\n---\n\n",
        yaml_string(title),
        !draft,
        now.format("%Y-%m-%d")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a scalar for a YAML header
fn yaml_string(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostField;
    use tempfile::TempDir;

    #[test]
    fn test_create_post() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let path = create_post(&folio, "Attention: It's All You Need", None, false).unwrap();
        assert_eq!(path, folio.content_dir.join("attention-its-all-you-need.md"));

        let fields = folio
            .store()
            .get_post_by_slug("attention-its-all-you-need", &[PostField::Title, PostField::Active])
            .unwrap();
        assert_eq!(fields.get_str(PostField::Title), Some("Attention: It's All You Need"));
        assert_eq!(fields.get(PostField::Active), Some(&serde_yaml::Value::Bool(true)));
    }

    #[test]
    fn test_draft_is_inactive() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        create_post(&folio, "Draft", Some("wip"), true).unwrap();
        assert!(folio.store().load_active_posts().unwrap().is_empty());
        assert!(!folio.store().load_post("wip").unwrap().active);
    }

    #[test]
    fn test_existing_post_is_kept() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        fs::create_dir_all(&folio.content_dir).unwrap();
        fs::write(folio.content_dir.join("hello.mdx"), "Keep me").unwrap();

        assert!(create_post(&folio, "Hello", None, false).is_err());
        assert_eq!(
            fs::read_to_string(folio.content_dir.join("hello.mdx")).unwrap(),
            "Keep me"
        );
    }
}
