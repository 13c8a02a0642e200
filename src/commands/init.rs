//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::Folio;

const CONFIG_TEMPLATE: &str = r#"# Site
title: Blogs
description: Notes on machine learning and software
application_name: Folio
creator: John Doe
twitter: ''
keywords: []
authors:
  - name: John Doe
    url: https://example.com
language: en

# URL
base_url: https://example.com
blog_route: blogs
cover_image: cover.png

# Directory
content_dir: blogs
public_dir: public
static_dir: static

# Rendering
highlight:
  theme: base16-ocean.dark
  line_number: false
markdown:
  raw_html: trusted
  math: true
  rewrite_links: true

# Sitemap
sitemap:
  post_changefreq: monthly
  post_priority: 0.7
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("blogs"))?;
    fs::create_dir_all(target_dir.join("static/images/blogs"))?;

    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("Site already initialized: {:?} exists", config_path);
    }
    fs::write(&config_path, CONFIG_TEMPLATE)?;

    let today = chrono::Local::now().format("%Y-%m-%d");
    let sample_post = format!(
        r#"---
title: Hello World
description: The first post on this site
active: true
date: {}
---

Welcome! Posts live in `blogs/` as markdown files with a YAML header.

## Math

Inline math like $e^{{i\pi}} + 1 = 0$ and display math:

$$
\int_0^1 x^2 \, dx = \frac{{1}}{{3}}
$$

## Code

```rust
fn main() {{
    println!("Hello, world!");
}}
```

Read the [blog index](/blogs/) or visit [Rust](https://www.rust-lang.org/).
"#,
        today
    );

    fs::write(target_dir.join("blogs/hello-world.md"), sample_post)?;
    tracing::debug!("Scaffolded site in {:?}", target_dir);

    Ok(())
}

/// Run the init command with an existing instance
pub fn run(folio: &Folio) -> Result<()> {
    init_site(&folio.base_dir)
}
