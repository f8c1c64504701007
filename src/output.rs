//! User-facing console lines and the confirmation prompt.
//! Colors are enabled only when stdout is a TTY.

use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn tagged(tag: &str, paint: fn(&str) -> String, msg: &str) -> String {
    if is_tty() {
        format!("{} {}", paint(tag), msg)
    } else {
        format!("{tag} {msg}")
    }
}

pub fn print_info(msg: &str) {
    println!("{}", tagged("info:", |t| t.cyan().bold().to_string(), msg));
}

pub fn print_warn(msg: &str) {
    eprintln!("{}", tagged("warn:", |t| t.yellow().bold().to_string(), msg));
}

pub fn print_error(msg: &str) {
    eprintln!("{}", tagged("error:", |t| t.red().bold().to_string(), msg));
}

pub fn print_success(msg: &str) {
    println!("{}", tagged("ok:", |t| t.green().bold().to_string(), msg));
}

/// Plain line without prefix, for output users may script against
/// (e.g. the final "Picked files" summary).
pub fn print_user(msg: &str) {
    println!("{msg}");
}

/// Empty answer, `y` or `Y` means yes.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim_end_matches(['\r', '\n']), "" | "y" | "Y")
}

/// Ask a yes/no question on stdout and read one line from `input`.
/// End of input counts as the default answer (yes).
pub fn confirm<R: BufRead>(question: &str, input: &mut R) -> io::Result<bool> {
    print!("{question} [Y/n] ");
    io::stdout().flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(is_affirmative(&line))
}
