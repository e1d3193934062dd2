pub mod location;
pub mod navigation;
