//! Output formatting for screening results.

mod json;
mod terminal;

pub use json::{from_json, load_json, save_json, to_json, to_json_pretty};
pub use terminal::format_result;
