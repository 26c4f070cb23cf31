//! Headless browser adapters.

mod webdriver;

pub use webdriver::{WebDriverBrowser, WebDriverConfig, WebDriverPage};
