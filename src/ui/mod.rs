// Wed Jan 15 2026 - Alex

pub mod cli;
pub mod table;

pub use cli::{Args, Command, CommandHandler};
pub use table::TableBuilder;

pub fn print_error(message: &str) {
    use colored::Colorize;
    eprintln!("{} {}", "[ERROR]".red(), message);
}
