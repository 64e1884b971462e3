//! Initialize a new site

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::Path;

const CONFIG: &str = r#"# Site
title: My Blog
description: ''
author: ''
timezone: ''

# URL
url: http://localhost:4000
baseurl: ''
permalink: /:year/:month/:day/:title/

# Directory
source: .
destination: _site
exclude:
  - README.md
  - "vendor/**"
  - "node_modules/**"

# Writing
show_drafts: false
excerpt_separator: <!-- more -->
related_posts: 5
defaults:
  post: post
  draft: post
  page: page

# Fail `check` and `build` on any front-matter warning
strict_front_matter: false
"#;

const ABOUT: &str = r#"---
layout: page
title: About
permalink: /about/
---

Write something about yourself here.
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join("_config.yml");
    if config_path.exists() {
        anyhow::bail!("{:?} already contains a site", target_dir);
    }

    fs::create_dir_all(target_dir.join("_posts"))?;
    fs::create_dir_all(target_dir.join("_drafts"))?;
    fs::write(&config_path, CONFIG)?;
    fs::write(target_dir.join("about.md"), ABOUT)?;

    let now = Utc::now();
    let sample_post = format!(
        r#"---
layout: post
title: Hello World
date: {}
tags: [welcome]
---

This is your first post. Every file under `_posts/` starts with a
front-matter block like the one above.

<!-- more -->

Run `folio check` to validate your content and `folio build` to resolve it
into `_site/`.
"#,
        now.format("%Y-%m-%d %H:%M:%S %z")
    );

    fs::write(
        target_dir
            .join("_posts")
            .join(format!("{}-hello-world.md", now.format("%Y-%m-%d"))),
        sample_post,
    )?;

    Ok(())
}
