//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod conclusions;
pub mod interpretation;
pub mod loading;
pub mod sidebar;
pub mod summary;
pub mod visualizations;

pub use conclusions::Conclusions;
pub use interpretation::Interpretation;
pub use loading::{FatalError, Loader, Toast};
pub use sidebar::Sidebar;
pub use summary::Summary;
pub use visualizations::Visualizations;
