//! Terminal output for quiz rounds and reports
//!
//! Colors follow NO_COLOR, CLICOLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print a labelled value (green label)
pub fn action(label: &str, msg: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for trees and config dumps)
pub fn info(msg: &(impl Display + ?Sized)) {
    println!("{}", msg);
}

/// Print prompt without newline (cyan)
pub fn prompt(msg: &(impl Display + ?Sized)) {
    use std::io::Write;
    print!("{} ", msg.to_string().cyan());
    std::io::stdout().flush().ok();
}

/// Numbered option line, 1-based.
pub fn option(number: usize, name: &str) {
    println!("  {:>2}. {}", number.to_string().bold(), name);
}

/// Feedback for one displayed option after grading.
pub fn answer_mark(name: &str, is_correct: bool, checked: bool) {
    match (is_correct, checked) {
        (true, true) => println!("  {} {}", "✓".green(), name),
        (true, false) => println!("  {} {} {}", "✗".red(), name, "(missed)".dimmed()),
        (false, true) => println!("  {} {} {}", "✗".red(), name, "(not in the tree)".dimmed()),
        (false, false) => println!("    {}", name.dimmed()),
    }
}

/// Round verdict with the streak counters.
pub fn verdict(correct: bool, consecutive: u32, previous: u32) {
    if correct {
        println!("{} {}", "Correct!".green().bold(), format!("Streak: {}", consecutive));
    } else {
        println!("{} {}", "Wrong.".red().bold(), format!("Streak ended at {}", previous));
    }
}
