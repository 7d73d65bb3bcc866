// Dioxus GUI Components Module

pub mod main_window;
pub mod node_view;

pub use main_window::MainWindow;
pub use node_view::NodeView;
