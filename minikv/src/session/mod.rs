pub mod command;
pub mod handlers;
pub mod repl;

pub use command::{Command, CommandError};
pub use handlers::AppState;
pub use repl::run;
