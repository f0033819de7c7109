//! bankfront library
//!
//! Client-side building blocks for the digital banking frontend: form-field
//! validation, currency and date formatting, theme persistence, toast
//! queueing, the backend HTTP client and the account cache.
//! Modules are exposed for integration testing.

pub mod accounts;
pub mod api;
pub mod config;
pub mod notify;
pub mod stores;
pub mod traits;
pub mod utils;
pub mod validation;

// Re-export commonly used types
pub use accounts::AccountCache;
pub use api::{Account, ApiClient, ApiError, ApiResponse};
pub use config::{Config, Theme};
pub use notify::{Toast, ToastKind, ToastQueue};
pub use stores::StdFileStore;
pub use traits::{AccountSource, FileStore};
pub use validation::{Field, FieldFeedback, FormReport, FormValidator, Rule, ValidationResult};
