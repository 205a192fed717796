use colored::Colorize;
use parking_lot::Mutex;

/// Track quiet mode state
static QUIET_MODE: std::sync::LazyLock<Mutex<bool>> =
    std::sync::LazyLock::new(|| Mutex::new(false));

/// Enable or disable quiet mode
#[inline]
pub fn set_quiet_mode(enabled: bool) {
    *QUIET_MODE.lock() = enabled;
}

/// Check if quiet mode is enabled
#[inline]
pub fn is_quiet_mode() -> bool {
    *QUIET_MODE.lock()
}

pub fn print_info(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.cyan().bold());
    }
}

pub fn print_warning(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.yellow().bold());
    }
}

pub fn print_error(message: &str) {
    // Always print errors, even in quiet mode
    eprintln!("{}", message.red().bold());
}

pub fn print_success(message: &str) {
    if !is_quiet_mode() {
        println!("{}", message.green().bold());
    }
}

/// Print content between a titled header and a footer rule
pub fn print_bordered_content(title: &str, content: &str) {
    if !is_quiet_mode() {
        println!("{}", format!("--- {title} ---").bright_purple());
        println!("{content}");
        println!("{}", "-".repeat(title.chars().count() + 8).bright_purple());
    }
}

/// Print a simple message (respects quiet mode)
pub fn print_message(message: &str) {
    if !is_quiet_mode() {
        println!("{message}");
    }
}

/// Print an empty line (respects quiet mode)
pub fn print_newline() {
    if !is_quiet_mode() {
        println!();
    }
}
