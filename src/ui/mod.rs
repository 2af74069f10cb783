//! Terminal user interface: app loop, input mapping and rendering

pub mod app;
pub mod input;
pub mod shell;
pub mod state;

pub use app::App;
pub use state::MenuState;
