pub mod background;
pub mod config;
pub mod reflection;
pub mod shadow;
