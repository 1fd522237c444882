/// Web module
///
/// Outbound HTTP: search provider, result cleanup and formatting, weather.

pub mod format;
pub mod sanitize;
pub mod search;
pub mod weather;

pub use search::{DuckDuckGo, SearchAnswer, SearchProvider, SearchResult, WebSearchAdapter};
pub use weather::Wttr;
