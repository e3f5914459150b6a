pub mod args;
pub mod config;
pub mod copy;
pub mod error;
pub mod guard;
pub mod locate;
pub mod log;
pub mod paths;
pub mod picker;
pub mod resolve;

pub use config::Config;
pub use copy::{CopyMode, Outcome, Report};
pub use error::{Error, Nesting};
pub use locate::locate;
pub use resolve::resolve;
