//! Helper functions for pages and templates

mod date;
mod nav;
mod url;

pub use date::*;
pub use nav::*;
pub use url::*;
