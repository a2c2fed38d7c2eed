pub mod reflection;
pub mod settings;
