pub mod api;
pub mod config;
pub mod logging;
pub mod suggest;
pub mod upstream;
