pub mod app;
pub mod predict;
