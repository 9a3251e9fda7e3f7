//! The route table: path → page factory, title, and preload metadata.
//!
//! The table is an ordered, immutable registry validated at construction:
//! paths are unique and the wildcard fallback, if present, must be the
//! terminal entry. Resolution is exact match first, then longest prefix,
//! then wildcard.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::page::Page;
use crate::route::loader::LoadError;

/// The wildcard path, matching anything no other entry matches.
pub const WILDCARD: &str = "*";

/// The root path every unmatched navigation redirects to.
pub const ROOT: &str = "/";

// ---------------------------------------------------------------------------
// RouteEntry
// ---------------------------------------------------------------------------

/// A boxed future resolving to a loaded page.
pub type PageFuture = Pin<Box<dyn Future<Output = Result<Box<dyn Page>, LoadError>> + Send>>;

/// A lazily invoked async page factory, shared across preload tasks.
pub type PageFactory = Arc<dyn Fn() -> PageFuture + Send + Sync>;

/// Informational fetch priority. The current preload policy fetches
/// uniformly; the value is carried for diagnostics and future policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Priority {
    High,
    #[default]
    Low,
}

/// What a route resolves to: a page to load, or a redirect to another path.
#[derive(Clone)]
pub enum RouteTarget {
    /// Lazily load and mount a page.
    Page(PageFactory),
    /// Redirect the navigation to another path.
    Redirect(String),
}

impl std::fmt::Debug for RouteTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouteTarget::Page(_) => f.write_str("Page(..)"),
            RouteTarget::Redirect(to) => write!(f, "Redirect({to:?})"),
        }
    }
}

/// One row of the route table.
#[derive(Debug, Clone)]
pub struct RouteEntry {
    /// URL-style path, e.g. `/about`. Unique within a table.
    pub path: String,
    /// Page title applied when this route activates.
    pub title: String,
    /// Whether the preload strategy fetches this entry in the background.
    pub preload: bool,
    /// Informational only in the current policy.
    pub priority: Priority,
    /// Page factory or redirect.
    pub target: RouteTarget,
}

impl RouteEntry {
    /// A page route with preloading off and low priority.
    pub fn page(
        path: impl Into<String>,
        title: impl Into<String>,
        factory: PageFactory,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            preload: false,
            priority: Priority::Low,
            target: RouteTarget::Page(factory),
        }
    }

    /// The wildcard fallback, redirecting every unmatched path to root.
    pub fn wildcard_redirect() -> Self {
        Self {
            path: WILDCARD.into(),
            title: String::new(),
            preload: false,
            priority: Priority::Low,
            target: RouteTarget::Redirect(ROOT.into()),
        }
    }

    /// Enable background preloading (builder).
    pub fn preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }

    /// Set the fetch priority (builder).
    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Whether this is the wildcard fallback entry.
    pub fn is_wildcard(&self) -> bool {
        self.path == WILDCARD
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Route table construction and resolution failures.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
    /// Two entries share a path.
    #[error("duplicate route path `{path}`")]
    DuplicatePath { path: String },
    /// The wildcard entry is not the last entry, so it would shadow every
    /// route registered after it.
    #[error("wildcard route must be the terminal entry")]
    WildcardNotTerminal,
    /// No entry (and no wildcard) matches the path.
    #[error("no route matches `{path}`")]
    NotFound { path: String },
    /// A redirect chain did not terminate at a page entry.
    #[error("redirect from `{from}` does not resolve to a page")]
    BadRedirect { from: String },
}

// ---------------------------------------------------------------------------
// RouteTable
// ---------------------------------------------------------------------------

/// The ordered, validated route registry.
#[derive(Debug, Clone)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// Validate and build a table.
    ///
    /// Fails if any path repeats, or the wildcard is followed by further
    /// entries.
    pub fn new(entries: Vec<RouteEntry>) -> Result<Self, RouteError> {
        for (index, entry) in entries.iter().enumerate() {
            if entries[..index].iter().any(|prev| prev.path == entry.path) {
                return Err(RouteError::DuplicatePath { path: entry.path.clone() });
            }
            if entry.is_wildcard() && index + 1 != entries.len() {
                return Err(RouteError::WildcardNotTerminal);
            }
        }
        Ok(Self { entries })
    }

    /// All entries in registration order.
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Resolve a requested path to its entry.
    ///
    /// Exact match wins; otherwise the longest entry path that is a proper
    /// segment prefix of the request (`/projects` for `/projects/folio`);
    /// otherwise the wildcard. Unmatched paths without a wildcard are
    /// [`RouteError::NotFound`].
    pub fn resolve(&self, path: &str) -> Result<&RouteEntry, RouteError> {
        if let Some(entry) = self.entries.iter().find(|e| e.path == path) {
            return Ok(entry);
        }

        let prefix_match = self
            .entries
            .iter()
            .filter(|e| !e.is_wildcard() && e.path != ROOT)
            .filter(|e| {
                path.strip_prefix(e.path.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|e| e.path.len());
        if let Some(entry) = prefix_match {
            return Ok(entry);
        }

        self.entries
            .iter()
            .find(|e| e.is_wildcard())
            .ok_or_else(|| RouteError::NotFound { path: path.to_owned() })
    }
}

// ===========================================================================
// Tests
// ===========================================================================
