pub mod card;
pub mod config;
pub mod data_source;
pub mod debounce;
pub mod http_client;
pub mod input;
pub mod pagination;
pub mod provider;
pub mod state;
