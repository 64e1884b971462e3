//! Build the site

use anyhow::Result;
use notify::RecursiveMode;
use notify_debouncer_mini::new_debouncer;
use std::path::Path;
use std::time::{Duration, Instant};

use crate::content::ContentLoader;
use crate::generator::{BuildReport, Generator, JsonSink};
use crate::Site;

/// Run one full build pass, writing pages under the destination directory
pub fn run(site: &Site) -> Result<BuildReport> {
    let start = Instant::now();

    let loaded = ContentLoader::new(site)?.load();
    tracing::info!(
        "Loaded {} files ({} could not be parsed)",
        loaded.records.len() + loaded.errors.len(),
        loaded.errors.len()
    );

    let generator = Generator::new(site)?;
    let mut sink = JsonSink::new(&site.destination_dir);
    let report = generator.generate(loaded, &mut sink)?;

    report.log();
    tracing::info!("Built in {:.2}s", start.elapsed().as_secs_f64());

    Ok(report)
}

/// Rebuild whenever content or `_config.yml` changes. Runs until the
/// watcher channel closes.
pub async fn watch(site: &Site) -> Result<()> {
    let site = site.clone();
    tokio::task::spawn_blocking(move || watch_blocking(&site)).await?
}

fn watch_blocking(site: &Site) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    debouncer
        .watcher()
        .watch(&site.source_dir, RecursiveMode::Recursive)?;
    tracing::debug!("Watching: {:?}", site.source_dir);

    let config_path = site.base_dir.join("_config.yml");
    if config_path.exists() && !config_path.starts_with(&site.source_dir) {
        debouncer
            .watcher()
            .watch(&config_path, RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let changed: Vec<_> = events
                    .iter()
                    .filter(|e| is_relevant(site, &e.path))
                    .collect();
                if changed.is_empty() {
                    continue;
                }

                for event in &changed {
                    tracing::info!("Changed: {}", event.path.display());
                }

                // Reload so edits to _config.yml take effect
                let result = Site::new(&site.base_dir)
                    .map_err(anyhow::Error::from)
                    .and_then(|site| run(&site));
                if let Err(e) = result {
                    tracing::error!("Build failed: {:#}", e);
                }
            }
            Ok(Err(e)) => {
                tracing::error!("Watch error: {:?}", e);
            }
            Err(_) => break,
        }
    }

    Ok(())
}

/// Output files and editor/VCS noise must not trigger rebuilds
fn is_relevant(site: &Site, path: &Path) -> bool {
    if path.starts_with(&site.destination_dir) {
        return false;
    }
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
}
