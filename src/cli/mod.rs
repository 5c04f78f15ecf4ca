pub mod action;
pub mod menu;

pub use action::MenuAction;
pub use menu::MenuController;
