pub mod fetch_panel;
pub mod mona;
