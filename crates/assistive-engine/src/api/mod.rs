pub mod activity;
pub mod types;
pub mod voice;
