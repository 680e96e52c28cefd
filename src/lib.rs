pub mod client;
pub mod config;
pub mod connection;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod notify;
pub mod render;
pub mod store;
#[cfg(test)]
pub mod test_helpers;
pub mod transport;
pub mod view;
