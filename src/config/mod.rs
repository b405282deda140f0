//! Configuration module

mod site;

pub use site::BodySourceKind;
pub use site::NavLink;
pub use site::SiteConfig;
