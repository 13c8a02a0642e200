//! Generate static files

use anyhow::Result;
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::generator::Generator;
use crate::Folio;

const DEBOUNCE: Duration = Duration::from_millis(500);

/// Generate the static site
pub fn run(folio: &Folio) -> Result<()> {
    let start = Instant::now();

    let generator = Generator::new(folio)?;
    generator.generate()?;

    let duration = start.elapsed();
    tracing::info!("Generated in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Paths whose changes trigger a rebuild
pub fn watched_paths(folio: &Folio) -> Vec<(PathBuf, RecursiveMode)> {
    let candidates = [
        (folio.content_dir.clone(), RecursiveMode::Recursive),
        (folio.static_dir.clone(), RecursiveMode::Recursive),
        (folio.base_dir.join("_config.yml"), RecursiveMode::NonRecursive),
    ];
    candidates
        .into_iter()
        .filter(|(path, _)| path.exists())
        .collect()
}

/// Watch for file changes and regenerate
pub async fn watch(folio: &Folio) -> Result<()> {
    let folio = folio.clone();
    tracing::info!("Watching for changes. Press Ctrl+C to stop.");
    // the debouncer delivers on a blocking std channel
    tokio::task::spawn_blocking(move || watch_blocking(&folio, || {})).await?
}

/// Regenerate after every debounced batch of relevant changes, calling
/// `on_rebuilt` after each successful build. Returns when the watcher stops.
pub fn watch_blocking<F: FnMut()>(folio: &Folio, mut on_rebuilt: F) -> Result<()> {
    let paths = watched_paths(folio);
    if paths.is_empty() {
        anyhow::bail!("Nothing to watch in {:?}", folio.base_dir);
    }

    let (tx, rx) = std::sync::mpsc::channel();
    let mut debouncer = new_debouncer(DEBOUNCE, tx)?;
    for (path, mode) in paths {
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                tracing::error!("Watch error: {:?}", e);
                continue;
            }
        };

        let changed = relevant_paths(&events);
        if changed.is_empty() {
            continue;
        }
        for path in &changed {
            tracing::info!("File changed: {}", path.display());
        }

        // _config.yml may have changed too
        match Folio::new(&folio.base_dir).and_then(|folio| run(&folio)) {
            Ok(()) => on_rebuilt(),
            Err(e) => tracing::error!("Generation failed: {:#}", e),
        }
    }

    Ok(())
}

fn relevant_paths(events: &[DebouncedEvent]) -> Vec<&Path> {
    events
        .iter()
        .map(|event| event.path.as_path())
        .filter(|path| is_relevant(path))
        .collect()
}

/// Editor and VCS noise does not trigger a rebuild
fn is_relevant(path: &Path) -> bool {
    let path_str = path.to_string_lossy();
    !path_str.contains(".git")
        && !path_str.contains(".DS_Store")
        && !path_str.ends_with('~')
        && !path_str.ends_with(".swp")
}
