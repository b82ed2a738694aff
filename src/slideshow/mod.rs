//! Slideshow - a shuffled image carousel with timed and manual navigation

mod controller;
mod images;
mod session;

pub use controller::{shuffle, Direction, Input, SlideshowState, Transition};
pub use images::ImageList;
pub use session::{SlideshowSession, Update, EXIT_REDIRECT};
