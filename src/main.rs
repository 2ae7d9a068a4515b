// Tue Jan 13 2026 - Alex

use cstructkit::ui::{cli, print_error};

fn main() {
    if let Err(e) = cli::run() {
        print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
