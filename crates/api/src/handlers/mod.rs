pub mod assets;
pub mod dashboard;
pub mod generation;
pub mod maintenance;
pub mod templates;
pub mod versions;
