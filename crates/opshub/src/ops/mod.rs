//! Restaurant operations: inventory status, guest reviews, staff announcements, and the
//! pre-shift brief that pulls them together.

pub mod adapters;
pub mod brief;
pub mod domain;
pub mod router;
pub mod services;
pub mod store;
pub mod themes;
pub mod window;

pub use adapters::{AdapterFlag, AdapterRegistry, InventorySource, ReviewSource, SourceError};
pub use brief::{Brief, BriefCompiler, BriefRenderer, BriefView, DocumentFormat};
pub use domain::{Change, InventoryItem, Review, StockStatus};
pub use router::{ops_router, OpsState};
pub use services::{BriefError, BriefService, InventoryService, ReviewService};
pub use store::{InMemoryStore, StoreError};
pub use themes::{ThemeCount, ThemeExtractor};
pub use window::{ReviewWindow, WindowError};
