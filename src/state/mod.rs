//! Application state module

mod app_state;
mod document;
mod effects;
mod filter;
mod forms;
mod navigation;
mod notification;
mod resume;
mod timer;
mod visibility;

pub use app_state::*;
pub use document::*;
pub use effects::*;
pub use filter::*;
pub use forms::*;
pub use navigation::*;
pub use notification::*;
pub use resume::*;
pub use timer::*;
pub use visibility::*;
