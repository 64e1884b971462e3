//! Clean the destination directory

use anyhow::Result;
use std::fs;

use crate::Site;

/// Remove everything a build wrote
pub fn run(site: &Site) -> Result<()> {
    if site.destination_dir == site.base_dir || site.destination_dir == site.source_dir {
        anyhow::bail!(
            "Refusing to delete {:?}: destination is the site directory",
            site.destination_dir
        );
    }

    if site.destination_dir.exists() {
        fs::remove_dir_all(&site.destination_dir)?;
        tracing::info!("Deleted: {:?}", site.destination_dir);
    }

    Ok(())
}
