mod app;
mod entry;
mod input;
mod keys;
mod list;
mod markdown;
mod suggest;
mod theme;

pub use app::{App, Cmd, Msg, draw};
pub(crate) use app::run;
pub use entry::{ListEntry, to_list_entries};
pub use keys::decode_keys;
pub use markdown::RenderError;
pub use theme::Theme;
