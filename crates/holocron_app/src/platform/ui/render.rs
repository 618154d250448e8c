use std::io::{self, Write};
use std::path::Path;

use chrono::Local;
use holocron_core::{escape_html, LoadOutcome, LoadPhase, PageViewModel};
use holocron_logging::holo_error;

use crate::platform::publish::ResultsPublisher;

pub const HELP_TEXT: &str = "\
Type a search and press Enter; an empty line lists everyone.
  :n, :next   next page
  :p, :prev   previous page
  :h, :help   this help
  :q, :quit   exit
  ::text      search for text that starts with ':'";

/// Draws the status line and page buttons on a terminal and mirrors the
/// results container into the published HTML document.
pub struct TerminalView<W: Write> {
    out: W,
    publisher: ResultsPublisher,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, publisher: ResultsPublisher) -> Self {
        Self { out, publisher }
    }

    pub fn render(&mut self, view: &PageViewModel) {
        let document = results_document(view, &Local::now().to_rfc3339());
        if let Err(err) = self.publisher.publish(&document) {
            holo_error!("Failed to publish results: {}", err);
        }
        let block = status_block(view, &self.publisher.target());
        if let Err(err) = self.write_text(&block) {
            holo_error!("Failed to write to terminal: {}", err);
        }
    }

    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")?;
        self.out.flush()
    }
}

pub fn status_block(view: &PageViewModel, results_path: &Path) -> String {
    let mut block = format!(
        "{prev}  {status}  {next}",
        prev = button("< prev", view.prev_enabled),
        status = view.status,
        next = button("next >", view.next_enabled),
    );
    if view.phase == LoadPhase::Idle {
        if let Some(LoadOutcome::Failed { message }) = &view.last_outcome {
            block.push_str(&format!("\n  error: {message}"));
        }
        block.push_str(&format!("\n  results: {}", results_path.display()));
    }
    block
}

fn button(label: &str, enabled: bool) -> String {
    if enabled {
        format!("[{label}]")
    } else {
        format!(" {} ", "-".repeat(label.chars().count()))
    }
}

/// Full HTML page around the results fragment. The fragment is already
/// escaped by the core; the status and URL are escaped here.
pub fn results_document(view: &PageViewModel, generated_at: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="generated" content="{generated}">
<title>People directory</title>
</head>
<body>
<p class="status">{status}</p>
<p class="source"><a href="{url}">{url}</a></p>
<nav><button{prev}>Previous</button> <button{next}>Next</button></nav>
<section id="results">
{results}
</section>
</body>
</html>
"#,
        generated = escape_html(generated_at),
        status = escape_html(&view.status),
        url = escape_html(&view.current_url),
        prev = disabled_attr(view.prev_enabled),
        next = disabled_attr(view.next_enabled),
        results = view.results_html,
    )
}

fn disabled_attr(enabled: bool) -> &'static str {
    if enabled {
        ""
    } else {
        " disabled"
    }
}
