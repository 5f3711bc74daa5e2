pub mod browser;
pub mod rendering;
pub mod services;

pub use services::{BrowserTimeProvider, ConsoleLogger};
