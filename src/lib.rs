//! Client-side controllers for the file manager web app: upload progress
//! feedback and confirmed deletion, with their page, prompt, HTTP and
//! refresh capabilities passed in explicitly.

pub mod cli;
pub mod config;
pub mod deletion;
pub mod error;
pub mod page;
pub mod progress;
pub mod prompt;
pub mod refresh;
pub mod transport;
pub mod utils;
