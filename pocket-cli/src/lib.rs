pub mod app;
pub mod config;
pub mod contacts_view;
pub mod logging;
pub mod repl;
