//! Routing: declarative route table, lazy bundle loading, background
//! preloading, and the navigation dispatcher.

pub mod loader;
pub mod preload;
pub mod router;
pub mod table;

pub use loader::{LoadError, RouteLoader};
pub use preload::PreloadStrategy;
pub use router::{PendingNavigation, Router};
pub use table::{PageFactory, Priority, RouteEntry, RouteError, RouteTable, RouteTarget, ROOT, WILDCARD};
