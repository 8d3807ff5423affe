//! Reusable maud components for the web UI.

pub mod alert;
pub mod layout;

pub use alert::{Alert, AlertVariant};
pub use layout::BaseLayout;
