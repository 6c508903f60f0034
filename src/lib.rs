pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod form_prompt;
pub mod import;
pub mod logging;
