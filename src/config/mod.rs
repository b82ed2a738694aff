//! Configuration module

mod site;

pub use site::BackgroundConfig;
pub use site::ConfigError;
pub use site::GalleryImage;
pub use site::HighlightConfig;
pub use site::LinkItem;
pub use site::SiteConfig;
pub use site::SlideshowConfig;
pub use site::SurpriseConfig;
pub use site::WorkItem;
