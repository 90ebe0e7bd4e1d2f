//! # Traversal Configuration
//!
//! Settings and constants shared by the traversal engine and the validation
//! layer, plus layered settings loading.
//!
//! ## Features
//!
//! - **Member Selection**: [`TraversalSettings`] decides which member
//!   categories of a type count as structural
//! - **Validation Policy**: [`ValidationSettings`] adds the stop-on-first-error switch
//! - **Loading**: TOML files with profile overlays and `TRAVERSAL__*` environment overrides
//!
//! ## Usage
//!
//! ```rust
//! use traversal_config::{TraversalSettings, ValidationSettings};
//!
//! let settings = ValidationSettings {
//!     traversal: TraversalSettings::default().with_public_fields(true),
//!     stop_on_first_error: true,
//! };
//! assert!(settings.traversal.includes_public_properties());
//! ```

pub mod constants;
pub mod loader;
pub mod settings;

// Re-export commonly used types
pub use constants::*;
pub use loader::load_settings;
pub use settings::{TraversalSettings, ValidationSettings};
