pub mod scrape;

pub use crate::utils::tui::create_spinner;
