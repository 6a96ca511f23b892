pub mod anonymize;
pub mod ids;
pub mod render;
pub mod show;
