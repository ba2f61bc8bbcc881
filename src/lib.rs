pub mod ask;
pub mod cache;
pub mod config;
pub mod dataset;
pub mod facts;
pub mod models;
pub mod openai;
pub mod question;
pub mod resolve;
pub mod server;

pub use config::AppConfig;
pub use server::run_server;
