//! Navigation dispatcher: resolve, redirect, lazily load, abandon stale loads.
//!
//! A navigation is two phases: synchronous resolution (exact match, redirect
//! hop, or redirect-to-root for unknown paths) and an async bundle load on a
//! spawned task. The [`Router`] stamps every load with a generation number;
//! navigating again before the previous load completes abandons it — a stale
//! result is never installed.

use tokio::sync::oneshot;
use tracing::warn;

use super::loader::{LoadError, RouteLoader};
use super::table::{RouteEntry, RouteError, RouteTable, RouteTarget, ROOT};
use crate::page::Page;

// ---------------------------------------------------------------------------
// PendingNavigation
// ---------------------------------------------------------------------------

/// An in-flight navigation: resolved metadata plus the load completion
/// channel. Dropping it abandons the load.
pub struct PendingNavigation {
    /// Generation stamp; only the router's current generation may install.
    pub generation: u64,
    /// Resolved path (post-redirect).
    pub path: String,
    /// Title to apply on activation.
    pub title: String,
    rx: oneshot::Receiver<Result<Box<dyn Page>, LoadError>>,
}

impl PendingNavigation {
    /// Poll the load without blocking.
    ///
    /// Returns `None` while the fetch is still in flight, `Some(result)`
    /// exactly once when it completes. A dropped loader task surfaces as a
    /// fetch error.
    pub fn try_take(&mut self) -> Option<Result<Box<dyn Page>, LoadError>> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(LoadError::Fetch {
                path: self.path.clone(),
                reason: "loader task dropped".into(),
            })),
        }
    }
}

impl std::fmt::Debug for PendingNavigation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PendingNavigation")
            .field("generation", &self.generation)
            .field("path", &self.path)
            .field("title", &self.title)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Owns the route table and loader, and stamps navigations with generations.
#[derive(Debug)]
pub struct Router {
    table: RouteTable,
    loader: RouteLoader,
    generation: u64,
}

impl Router {
    /// Create a router over a validated table.
    pub fn new(table: RouteTable, loader: RouteLoader) -> Self {
        Self {
            table,
            loader,
            generation: 0,
        }
    }

    /// The route table.
    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// The bundle loader (shared warm cache).
    pub fn loader(&self) -> &RouteLoader {
        &self.loader
    }

    /// Whether `generation` is still the latest navigation.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    /// Resolve `requested` and spawn its bundle load.
    ///
    /// Unknown paths and redirect entries are sent to the redirect target
    /// (the wildcard sends everything to `/`), logged at warn. The previous
    /// pending navigation, if any, becomes stale: the caller replaces its
    /// handle and the generation check rejects a late result.
    pub fn begin_navigation(&mut self, requested: &str) -> Result<PendingNavigation, RouteError> {
        let entry = self.resolve_page_entry(requested)?.clone();

        self.generation += 1;
        let generation = self.generation;
        let path = entry.path.clone();
        let title = entry.title.clone();

        let (tx, rx) = oneshot::channel();
        let loader = self.loader.clone();
        tokio::spawn(async move {
            // A dropped receiver means the navigation was abandoned; the
            // loaded page is discarded with the send.
            let _ = tx.send(loader.load(&entry).await);
        });

        Ok(PendingNavigation { generation, path, title, rx })
    }

    /// Resolve to a page entry, following at most one redirect hop.
    fn resolve_page_entry(&self, requested: &str) -> Result<&RouteEntry, RouteError> {
        let entry = match self.table.resolve(requested) {
            Ok(entry) => entry,
            Err(RouteError::NotFound { path }) => {
                // No wildcard in the table; fall back to root directly.
                warn!(%path, "no route matched; redirecting to root");
                self.table.resolve(ROOT)?
            }
            Err(other) => return Err(other),
        };

        match &entry.target {
            RouteTarget::Page(_) => Ok(entry),
            RouteTarget::Redirect(to) => {
                warn!(requested, redirect = %to, "route redirected");
                match self.table.resolve(to)? {
                    target if matches!(target.target, RouteTarget::Page(_)) => Ok(target),
                    _ => Err(RouteError::BadRedirect { from: entry.path.clone() }),
                }
            }
        }
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::{Blueprint, Section};
    use crate::route::table::PageFactory;
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Debug)]
    struct NamedPage(&'static str);

    impl Page for NamedPage {
        fn path(&self) -> &'static str {
            self.0
        }
        fn title(&self) -> &'static str {
            "Named"
        }
        fn blueprint(&self) -> Blueprint {
            Blueprint::new(vec![Section::new().with_line(self.0)])
        }
    }

    fn factory(path: &'static str) -> PageFactory {
        Arc::new(move || Box::pin(async move { Ok(Box::new(NamedPage(path)) as Box<dyn Page>) }))
    }

    fn router(fetch_delay: Duration) -> Router {
        let table = RouteTable::new(vec![
            RouteEntry::page("/", "Uma Shankar - Software Engineer", factory("/")),
            RouteEntry::page("/about", "About | Uma Shankar", factory("/about")).preload(true),
            RouteEntry::wildcard_redirect(),
        ])
        .unwrap();
        Router::new(table, RouteLoader::new(fetch_delay))
    }

    /// Drive a pending navigation to completion under a paused clock.
    async fn complete(pending: &mut PendingNavigation, step: Duration) -> Box<dyn Page> {
        for _ in 0..64 {
            tokio::time::advance(step).await;
            tokio::task::yield_now().await;
            if let Some(result) = pending.try_take() {
                return result.unwrap();
            }
        }
        panic!("navigation never completed");
    }

    #[tokio::test(start_paused = true)]
    async fn navigation_resolves_and_loads() {
        let mut router = router(Duration::from_millis(50));
        let mut pending = router.begin_navigation("/about").unwrap();
        assert_eq!(pending.path, "/about");
        assert_eq!(pending.title, "About | Uma Shankar");
        assert!(pending.try_take().is_none(), "load must not be synchronous");

        let page = complete(&mut pending, Duration::from_millis(25)).await;
        assert_eq!(page.path(), "/about");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_path_redirects_to_root() {
        let mut router = router(Duration::ZERO);
        let pending = router.begin_navigation("/unknown-page").unwrap();
        assert_eq!(pending.path, "/");
        assert_eq!(pending.title, "Uma Shankar - Software Engineer");
    }

    #[tokio::test(start_paused = true)]
    async fn not_found_without_wildcard_redirects_to_root() {
        let table = RouteTable::new(vec![RouteEntry::page(
            "/",
            "Uma Shankar - Software Engineer",
            factory("/"),
        )])
        .unwrap();
        let mut router = Router::new(table, RouteLoader::new(Duration::ZERO));
        let pending = router.begin_navigation("/nowhere").unwrap();
        assert_eq!(pending.path, "/");
    }

    #[tokio::test(start_paused = true)]
    async fn newer_navigation_outdates_older_generation() {
        let mut router = router(Duration::from_millis(50));
        let first = router.begin_navigation("/about").unwrap();
        let second = router.begin_navigation("/").unwrap();

        assert!(!router.is_current(first.generation));
        assert!(router.is_current(second.generation));
    }

    #[tokio::test(start_paused = true)]
    async fn abandoned_navigation_result_is_discardable() {
        let mut router = router(Duration::from_millis(50));
        let mut first = router.begin_navigation("/about").unwrap();
        let mut second = router.begin_navigation("/").unwrap();

        // Both loads complete, but only the current generation may install.
        let _ = complete(&mut first, Duration::from_millis(25)).await;
        let page = complete(&mut second, Duration::from_millis(25)).await;
        assert!(!router.is_current(first.generation));
        assert!(router.is_current(second.generation));
        assert_eq!(page.path(), "/");
    }
}
