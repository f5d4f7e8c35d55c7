pub mod aggregator;
pub mod bot;
pub mod cli;
pub mod config;
pub mod dates;
pub mod domain;
pub mod errors;
pub mod filter;
pub mod sources;
pub mod storage;
