//! Lazy bundle loading with a warm cache.
//!
//! A route's code is "fetched" the first time it is needed — simulated here
//! by a fixed async delay, standing in for the network trip a real deployment
//! pays for a lazy chunk. Fetched paths are recorded in a shared warm set so
//! every later navigation (or a background preload) skips the delay and
//! resolves instantly.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::page::Page;
use crate::route::table::{RouteEntry, RouteTarget};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Bundle load failures. Never fatal: navigation falls back, preloads log.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LoadError {
    /// The simulated fetch (or the page factory) failed.
    #[error("bundle fetch failed for `{path}`: {reason}")]
    Fetch { path: String, reason: String },
    /// A redirect entry reached the loader; redirects carry no bundle.
    #[error("route `{path}` is a redirect and has no bundle")]
    NotLoadable { path: String },
}

// ---------------------------------------------------------------------------
// RouteLoader
// ---------------------------------------------------------------------------

/// Fetches route bundles, remembering which paths are already warm.
///
/// Cloning shares the warm cache — the preload tasks and the router see the
/// same set.
#[derive(Debug, Clone)]
pub struct RouteLoader {
    fetch_delay: Duration,
    warm: Arc<Mutex<HashSet<String>>>,
}

impl RouteLoader {
    /// Create a loader with the given simulated fetch delay.
    pub fn new(fetch_delay: Duration) -> Self {
        Self {
            fetch_delay,
            warm: Arc::new(Mutex::new(HashSet::new())),
        }
    }

    /// Whether the path's bundle has already been fetched.
    pub fn is_warm(&self, path: &str) -> bool {
        self.warm.lock().expect("warm cache lock poisoned").contains(path)
    }

    /// Number of warm bundles.
    pub fn warm_count(&self) -> usize {
        self.warm.lock().expect("warm cache lock poisoned").len()
    }

    /// Load the entry's page, paying the fetch delay only on a cold path.
    ///
    /// The path is marked warm only after a successful fetch, so a failed
    /// preload retries from cold on the next navigation.
    pub async fn load(&self, entry: &RouteEntry) -> Result<Box<dyn Page>, LoadError> {
        let RouteTarget::Page(factory) = &entry.target else {
            return Err(LoadError::NotLoadable { path: entry.path.clone() });
        };

        if !self.is_warm(&entry.path) && !self.fetch_delay.is_zero() {
            tokio::time::sleep(self.fetch_delay).await;
        }
        let page = factory().await?;
        self.warm
            .lock()
            .expect("warm cache lock poisoned")
            .insert(entry.path.clone());
        Ok(page)
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
    use tokio::time::Instant;

    #[derive(Debug)]
    struct StubPage;

    impl Page for StubPage {
        fn path(&self) -> &'static str {
            "/stub"
        }
        fn title(&self) -> &'static str {
            "Stub"
        }
        fn blueprint(&self) -> Blueprint {
            Blueprint::new(vec![Section::new().with_line("stub")])
        }
    }

    fn stub_factory() -> PageFactory {
        Arc::new(|| Box::pin(async { Ok(Box::new(StubPage) as Box<dyn Page>) }))
    }

    fn failing_factory() -> PageFactory {
        Arc::new(|| {
            Box::pin(async {
                Err(LoadError::Fetch {
                    path: "/stub".into(),
                    reason: "chunk missing".into(),
                })
            })
        })
    }

    fn entry(factory: PageFactory) -> RouteEntry {
        RouteEntry::page("/stub", "Stub", factory)
    }

    #[tokio::test(start_paused = true)]
    async fn cold_load_pays_fetch_delay() {
        let loader = RouteLoader::new(Duration::from_millis(120));
        let began = Instant::now();
        loader.load(&entry(stub_factory())).await.unwrap();
        assert!(began.elapsed() >= Duration::from_millis(120));
        assert!(loader.is_warm("/stub"));
    }

    #[tokio::test(start_paused = true)]
    async fn warm_load_is_instantaneous() {
        let loader = RouteLoader::new(Duration::from_millis(120));
        loader.load(&entry(stub_factory())).await.unwrap();

        let began = Instant::now();
        loader.load(&entry(stub_factory())).await.unwrap();
        assert_eq!(began.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_stays_cold() {
        let loader = RouteLoader::new(Duration::from_millis(10));
        let err = loader.load(&entry(failing_factory())).await.unwrap_err();
        assert!(matches!(err, LoadError::Fetch { .. }));
        assert!(!loader.is_warm("/stub"));
        assert_eq!(loader.warm_count(), 0);
    }

    #[tokio::test]
    async fn redirect_entry_is_not_loadable() {
        let loader = RouteLoader::new(Duration::ZERO);
        let err = loader
            .load(&RouteEntry::wildcard_redirect())
            .await
            .unwrap_err();
        assert_eq!(err, LoadError::NotLoadable { path: "*".into() });
    }

    #[tokio::test]
    async fn clones_share_the_warm_cache() {
        let loader = RouteLoader::new(Duration::ZERO);
        let clone = loader.clone();
        clone.load(&entry(stub_factory())).await.unwrap();
        assert!(loader.is_warm("/stub"));
    }
}
