//! List site content

use anyhow::Result;
use chrono::Utc;

use crate::content::{PostField, PostFields};
use crate::generator::sitemap;
use crate::Folio;

const LISTED_FIELDS: [PostField; 4] = [
    PostField::Slug,
    PostField::Title,
    PostField::Date,
    PostField::Active,
];

/// List site content by type
pub fn run(
    folio: &Folio,
    content_type: &str,
    all: bool,
    json: bool,
    fields: &[PostField],
) -> Result<()> {
    let output = match content_type {
        "post" | "posts" if fields.is_empty() => posts(folio, all, json)?,
        "post" | "posts" => post_fields(folio, all, json, fields)?,
        "route" | "routes" => routes(folio, json)?,
        _ => {
            anyhow::bail!("Unknown type: {}. Available: posts, routes", content_type);
        }
    };
    print!("{}", output);
    Ok(())
}

fn load(folio: &Folio, all: bool, fields: &[PostField]) -> Result<Vec<PostFields>> {
    let store = folio.store();
    let posts = if all {
        store
            .slugs()?
            .iter()
            .map(|slug| store.get_post_by_slug(slug, fields))
            .collect::<crate::Result<_>>()?
    } else {
        store.get_all_posts(fields)?
    };
    Ok(posts)
}

/// Active posts newest first, or every post by slug with `all`
pub fn posts(folio: &Folio, all: bool, json: bool) -> Result<String> {
    let posts = load(folio, all, &LISTED_FIELDS)?;

    if json {
        return Ok(serde_json::to_string_pretty(&posts)? + "\n");
    }

    let mut out = format!("Posts ({}):\n", posts.len());
    for post in &posts {
        let date = post.get_str(PostField::Date).unwrap_or("----------");
        let slug = post.get_str(PostField::Slug).unwrap_or_default();
        let title = post.get_str(PostField::Title).unwrap_or(slug);
        let marker = if all && !is_active(post) { " (inactive)" } else { "" };
        out.push_str(&format!("  {} - {} [{}]{}\n", date, title, slug, marker));
    }
    Ok(out)
}

/// Only the chosen fields of each post, one post per line
pub fn post_fields(folio: &Folio, all: bool, json: bool, fields: &[PostField]) -> Result<String> {
    let posts = load(folio, all, fields)?;

    if json {
        return Ok(serde_json::to_string_pretty(&posts)? + "\n");
    }

    let mut out = String::new();
    for post in &posts {
        let line: Vec<String> = post
            .iter()
            .map(|(field, value)| format!("{}={}", field, scalar(value)))
            .collect();
        out.push_str(&line.join("\t"));
        out.push('\n');
    }
    Ok(out)
}

fn scalar(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.replace('\n', "\\n"),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Null => String::new(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

/// Every URL the sitemap would list
pub fn routes(folio: &Folio, json: bool) -> Result<String> {
    let posts = folio.store().load_active_posts()?;
    let entries = sitemap::build(&folio.config, &posts, Utc::now());

    if json {
        return Ok(serde_json::to_string_pretty(&entries)? + "\n");
    }

    let mut out = format!("Routes ({}):\n", entries.len());
    for entry in &entries {
        out.push_str(&format!(
            "  {} ({}, {})\n",
            entry.loc,
            entry.changefreq.as_str(),
            sitemap::format_priority(entry.priority)
        ));
    }
    Ok(out)
}

fn is_active(post: &PostFields) -> bool {
    post.get(PostField::Active)
        .map(crate::content::is_truthy)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn folio() -> (TempDir, Folio) {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        fs::create_dir_all(&folio.content_dir).unwrap();
        let write = |name: &str, header: &str| {
            fs::write(
                folio.content_dir.join(name),
                format!("---\n{}\n---\nBody\n", header),
            )
            .unwrap();
        };
        write("old.md", "title: Old\nactive: true\ndate: 2024-01-01");
        write("hidden.md", "title: Hidden\nactive: false\ndate: 2024-06-01");
        write("new.md", "title: New\nactive: true\ndate: 2025-01-01");
        (tmp, folio)
    }

    #[test]
    fn test_list_active_posts() {
        let (_tmp, folio) = folio();
        let out = posts(&folio, false, false).unwrap();
        assert_eq!(
            out,
            "Posts (2):\n  2025-01-01 - New [new]\n  2024-01-01 - Old [old]\n"
        );
    }

    #[test]
    fn test_list_all_posts() {
        let (_tmp, folio) = folio();
        let out = posts(&folio, true, false).unwrap();
        assert!(out.starts_with("Posts (3):\n"));
        assert!(out.contains("Hidden [hidden] (inactive)"));
    }

    #[test]
    fn test_list_posts_json() {
        let (_tmp, folio) = folio();
        let out = posts(&folio, false, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["slug"], "new");
        assert_eq!(value[1]["title"], "Old");
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_list_routes() {
        let (_tmp, folio) = folio();
        let out = routes(&folio, false).unwrap();
        assert!(out.starts_with("Routes (6):\n"));
        assert!(out.contains("https://example.com/blogs/new/ (monthly, 0.7)"));
        assert!(!out.contains("hidden"));
    }

    #[test]
    fn test_list_selected_fields() {
        let (_tmp, folio) = folio();
        let out = post_fields(&folio, false, false, &[PostField::Slug, PostField::Image]).unwrap();
        assert_eq!(out, "slug=new\nslug=old\n");

        let out = post_fields(&folio, true, false, &[PostField::Title, PostField::Active]).unwrap();
        assert!(out.contains("title=Hidden\tactive=false\n"));
    }

    #[test]
    fn test_unknown_type() {
        let (_tmp, folio) = folio();
        assert!(run(&folio, "tags", false, false, &[]).is_err());
    }
}
