pub mod api;
pub mod keywords;
pub mod voice;
pub mod ws;
