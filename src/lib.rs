pub mod callbacks;
pub mod chart;
pub mod config;
pub mod data;
pub mod fetch;
pub mod layout;
pub mod report;
pub mod selector;
pub mod server;
