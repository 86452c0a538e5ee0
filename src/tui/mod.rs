pub mod app;
pub mod input;
pub mod intent;
pub mod layout;
pub mod nav;
pub mod render;
pub mod theme;
pub mod tree;
pub mod wrap;

pub use app::{App, run};
