mod account_routes;
mod catalog_routes;
pub mod config;
mod extract;
mod http_layers;
mod playlist_routes;
mod responses;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use http_layers::*;
pub use server::{make_app, run_server};
