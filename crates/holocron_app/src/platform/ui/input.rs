use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use holocron_logging::holo_warn;

/// What a line of terminal input means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// New value of the search box. Kept verbatim; trimming is the core's job.
    SearchInput(String),
    PrevPage,
    NextPage,
    Help,
    Quit,
    UnknownCommand(String),
    /// Stdin closed. Pending work is allowed to finish before exiting.
    EndOfInput,
}

pub fn parse_line(line: &str) -> UiEvent {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);

    // "::" escapes a search that really starts with a colon.
    if let Some(literal) = line.strip_prefix("::") {
        return UiEvent::SearchInput(format!(":{literal}"));
    }
    let Some(command) = line.strip_prefix(':') else {
        return UiEvent::SearchInput(line.to_string());
    };
    match command.trim() {
        "n" | "next" => UiEvent::NextPage,
        "p" | "prev" => UiEvent::PrevPage,
        "h" | "help" => UiEvent::Help,
        "q" | "quit" => UiEvent::Quit,
        other => UiEvent::UnknownCommand(other.to_string()),
    }
}

/// Reads stdin on a background thread. Each event carries the instant the
/// line was read, which is when the "edit" happened.
pub fn spawn_stdin_reader(tx: mpsc::Sender<(UiEvent, Instant)>) -> io::Result<()> {
    thread::Builder::new()
        .name("holocron-stdin".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            let mut lines = stdin.lock();
            let mut buf = String::new();
            loop {
                buf.clear();
                let event = match lines.read_line(&mut buf) {
                    Ok(0) => UiEvent::EndOfInput,
                    Ok(_) => parse_line(&buf),
                    Err(err) => {
                        holo_warn!("Failed to read stdin: {}", err);
                        UiEvent::EndOfInput
                    }
                };
                let done = event == UiEvent::EndOfInput;
                if tx.send((event, Instant::now())).is_err() || done {
                    break;
                }
            }
        })?;
    Ok(())
}
