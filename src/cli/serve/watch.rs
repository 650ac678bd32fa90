//! Background builder: first build, then rebuild on content and config
//! changes.
//!
//! ```text
//! notify → crossbeam channel → Debouncer (timing, dedup) → rebuild
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crossbeam::channel::{self, Receiver};
use notify::{RecursiveMode, Watcher};
use rustc_hash::FxHashMap;

use crate::cli::build::build_site;
use crate::config::{cfg, clear_clean_flag, reload_config};
use crate::core::{clear_build_error, is_serving, set_build_error, set_serving};
use crate::logger::{status_error, status_success};
use crate::utils::path::normalize_path;
use crate::utils::plural::plural_count;
use crate::{debug, log};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Modified,
    Removed,
}

impl ChangeKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Removed => "removed",
        }
    }
}

/// Debouncer: timing and event deduplication only.
pub struct Debouncer {
    /// Only paths at or below one of these are tracked
    roots: Vec<PathBuf>,
    changes: FxHashMap<PathBuf, ChangeKind>,
    last_event: Option<Instant>,
    last_build: Option<Instant>,
}

impl Debouncer {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self {
            roots,
            changes: FxHashMap::default(),
            last_event: None,
            last_build: None,
        }
    }

    /// Add a notify event, applying dedup rules:
    /// - Removed + Created/Modified → the new event (file was restored)
    /// - Modified + Removed → Removed
    /// - Created + Removed → dropped
    /// - otherwise the first event wins
    pub fn add_event(&mut self, event: &notify::Event) {
        use notify::EventKind;

        let kind = match event.kind {
            EventKind::Create(_) => ChangeKind::Created,
            EventKind::Remove(_) => ChangeKind::Removed,
            EventKind::Modify(modify) => {
                // mtime/chmod noise would loop rebuilds
                if matches!(modify, notify::event::ModifyKind::Metadata(_)) {
                    return;
                }
                ChangeKind::Modified
            }
            _ => return,
        };

        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }

            let path = normalize_path(path);
            if !self.roots.iter().any(|root| path.starts_with(root)) {
                continue;
            }

            match self.changes.get(&path).copied() {
                None => {
                    debug!("watch"; "{}: {}", kind.label(), path.display());
                    self.changes.insert(path, kind);
                }
                Some(ChangeKind::Removed) if kind != ChangeKind::Removed => {
                    self.changes.insert(path, kind);
                }
                Some(ChangeKind::Modified) if kind == ChangeKind::Removed => {
                    self.changes.insert(path, ChangeKind::Removed);
                }
                Some(ChangeKind::Created) if kind == ChangeKind::Removed => {
                    self.changes.remove(&path);
                }
                Some(_) => continue,
            }
            self.last_event = Some(Instant::now());
        }
    }

    /// Take pending changes once debounce and cooldown have elapsed.
    pub fn take_if_ready(&mut self) -> Option<FxHashMap<PathBuf, ChangeKind>> {
        if !self.is_ready() {
            return None;
        }

        let changes = std::mem::take(&mut self.changes);
        self.last_event = None;
        self.last_build = Some(Instant::now());
        Some(changes)
    }

    fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };

        if last_event.elapsed() < Duration::from_millis(DEBOUNCE_MS) {
            return false;
        }

        if let Some(last_build) = self.last_build
            && last_build.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS)
        {
            return false;
        }

        !self.changes.is_empty()
    }

    /// Sleep until the next moment changes could become ready.
    pub fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        let debounce_remaining =
            Duration::from_millis(DEBOUNCE_MS).saturating_sub(last_event.elapsed());

        let cooldown_remaining = self
            .last_build
            .map(|t| Duration::from_millis(REBUILD_COOLDOWN_MS).saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO);

        debounce_remaining
            .max(cooldown_remaining)
            .max(Duration::from_millis(1))
    }
}

/// Editor temp and backup files.
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Run the first build, then watch until shutdown.
///
/// The watcher is attached before the first build so edits made while it
/// runs are not lost.
pub fn run_builder(watch: bool, shutdown_rx: Receiver<()>) {
    let config = cfg();
    let (event_tx, event_rx) = channel::unbounded();

    let watcher = if watch {
        let roots = vec![config.build.content.clone(), config.config_path.clone()];
        match attach_watcher(&roots, event_tx) {
            Ok(watcher) => Some((watcher, roots)),
            Err(e) => {
                log!("watch"; "file watching disabled: {e}");
                None
            }
        }
    } else {
        None
    };

    rebuild(None);

    let Some((_watcher, roots)) = watcher else {
        return;
    };

    log!("watch"; "watching {} for changes", config.root_relative(&config.build.content).display());
    let mut debouncer = Debouncer::new(roots);

    loop {
        channel::select! {
            recv(event_rx) -> msg => match msg {
                Ok(Ok(event)) => debouncer.add_event(&event),
                Ok(Err(e)) => debug!("watch"; "notify error: {}", e),
                Err(_) => break,
            },
            recv(shutdown_rx) -> _ => break,
            default(debouncer.sleep_duration()) => {}
        }

        if let Some(changes) = debouncer.take_if_ready() {
            rebuild(Some(&changes));
        }
    }
}

fn attach_watcher(
    roots: &[PathBuf],
    tx: channel::Sender<notify::Result<notify::Event>>,
) -> notify::Result<notify::RecommendedWatcher> {
    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = tx.send(res);
    })?;
    for root in roots {
        let mode = if root.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        watcher.watch(root, mode)?;
    }
    Ok(watcher)
}

/// Build once. `changes` is `None` for the first build.
fn rebuild(changes: Option<&FxHashMap<PathBuf, ChangeKind>>) {
    if let Some(changes) = changes
        && changes.keys().any(|path| *path == cfg().config_path)
    {
        match reload_config() {
            Ok(true) => debug!("watch"; "config reloaded"),
            Ok(false) => {}
            Err(e) => {
                status_error("config error", &format!("{e:#}"));
                return;
            }
        }
    }

    let config = cfg();
    match build_site(&config, changes.is_some()) {
        Ok(count) => {
            if config.build.clean {
                clear_clean_flag();
            }
            clear_build_error();
            if !is_serving() {
                set_serving();
            }
            if let Some(changes) = changes {
                status_success(&format!(
                    "rebuilt {} ({})",
                    plural_count(count, "section"),
                    describe_changes(changes, &config.root)
                ));
            }
        }
        Err(e) => {
            let detail = format!("{e:#}");
            set_build_error(detail.clone());
            status_error("build failed", &detail);
        }
    }
}

fn describe_changes(changes: &FxHashMap<PathBuf, ChangeKind>, root: &Path) -> String {
    let mut parts: Vec<String> = changes
        .iter()
        .map(|(path, kind)| {
            let path = path.strip_prefix(root).unwrap_or(path);
            format!("{} {}", kind.label(), path.display())
        })
        .collect();
    parts.sort();
    parts.join(", ")
}
