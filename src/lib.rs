pub(crate) mod config;
pub(crate) mod direction;
pub(crate) mod engine;
pub(crate) mod grid;
pub(crate) mod input;
pub(crate) mod levels;
pub(crate) mod position;
pub(crate) mod render;
pub(crate) mod screen;
pub(crate) mod storage;

pub mod app;
