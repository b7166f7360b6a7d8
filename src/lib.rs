pub mod bridge;
pub mod config;
pub mod demo_feed;
pub mod display;
pub mod form;
pub mod http_client;
pub mod match_list;
pub mod models;
pub mod page_cache;
pub mod page_fetch;
pub mod provider;
pub mod state;
pub mod strings;
pub mod ui;
