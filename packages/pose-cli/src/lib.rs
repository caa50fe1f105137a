#![warn(clippy::use_self)]

pub mod config;
pub mod prerender;
pub mod shell;

mod util;

pub use self::shell::shell;

#[cfg(feature = "cli")]
mod cli;

#[cfg(feature = "cli")]
pub use cli::run;
