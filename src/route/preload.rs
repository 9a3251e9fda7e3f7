//! Background preloading of not-yet-visited routes.
//!
//! After the initial route has rendered, the strategy walks the table and
//! fetches every `preload = true` bundle on its own task, warming the shared
//! cache so later navigations resolve instantly. No ordering is guaranteed
//! between preloads; a failed preload is logged and the path stays cold.

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::loader::RouteLoader;
use super::table::{RouteTable, RouteTarget};

// ---------------------------------------------------------------------------
// PreloadStrategy
// ---------------------------------------------------------------------------

/// The uniform preload policy: every flagged entry is fetched, regardless of
/// its `priority` (which is carried as metadata only).
#[derive(Debug, Default, Clone, Copy)]
pub struct PreloadStrategy;

impl PreloadStrategy {
    /// Spawn one fetch task per `preload = true` page entry that is still
    /// cold. Returns the task handles so callers can await or drop them;
    /// dropping a handle does not cancel the fetch.
    pub fn spawn(self, table: &RouteTable, loader: &RouteLoader) -> Vec<JoinHandle<()>> {
        table
            .entries()
            .iter()
            .filter(|entry| entry.preload)
            .filter(|entry| matches!(entry.target, RouteTarget::Page(_)))
            .filter(|entry| !loader.is_warm(&entry.path))
            .map(|entry| {
                let entry = entry.clone();
                let loader = loader.clone();
                tokio::spawn(async move {
                    match loader.load(&entry).await {
                        Ok(_page) => debug!(path = %entry.path, "preloaded route bundle"),
                        // Non-fatal: the path stays cold and the next
                        // navigation fetches on demand.
                        Err(error) => warn!(path = %entry.path, %error, "preload failed"),
                    }
                })
            })
            .collect()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
