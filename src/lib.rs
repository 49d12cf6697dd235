pub mod api;
pub mod app;
pub mod browser;
pub mod cli;
pub mod config;
pub mod output;
pub mod utils;
pub mod view;

#[cfg(test)]
mod tests;
