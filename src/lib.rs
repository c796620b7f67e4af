// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// Module responsibilities:
// - `book`: the typed book record and the draft collected from the user.
// - `storage`: reading and writing the backing JSON file.
// - `catalog`: the in-memory store (add/remove/search/list/statistics);
//   saves through `storage` after every change.
// - `config`: where the backing file lives.
// - `ui`: the numbered menu loop, talking to the user through `Console`.
pub mod book;
pub mod catalog;
pub mod config;
pub mod error;
pub mod storage;
pub mod ui;

pub use book::{Book, NewBook};
pub use catalog::{Library, ReadingStats, SearchField};
pub use config::Config;
pub use error::CatalogError;
