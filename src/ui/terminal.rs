//! Terminal rendering of the presentation ports
//!
//! Counters go to stdout so they can be piped; the loading indicator,
//! field errors and navigation notices go to stderr.

use super::{Counter, Field, Navigator, Page, Presenter};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct ViewState {
    loading: bool,
    field_errors: HashMap<Field, String>,
    page: Option<Page>,
}

/// Presenter and navigator for the command line
#[derive(Debug, Default)]
pub struct TerminalView {
    state: Mutex<ViewState>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last page navigated to, if any
    pub fn current_page(&self) -> Option<Page> {
        self.state.lock().ok().and_then(|s| s.page)
    }

    /// Error text currently set on a field
    pub fn field_error(&self, field: Field) -> Option<String> {
        self.state
            .lock()
            .ok()
            .and_then(|s| s.field_errors.get(&field).cloned())
    }

    pub fn is_loading(&self) -> bool {
        self.state.lock().map(|s| s.loading).unwrap_or(false)
    }
}

impl Presenter for TerminalView {
    fn show_loading(&self) {
        if let Ok(mut state) = self.state.lock() {
            state.loading = true;
        }
        eprint!("Loading...");
        let _ = std::io::stderr().flush();
    }

    fn hide_loading(&self) {
        let was_loading = match self.state.lock() {
            Ok(mut state) => std::mem::replace(&mut state.loading, false),
            Err(_) => false,
        };
        if was_loading {
            // wipe the indicator line
            eprint!("\r{}\r", " ".repeat("Loading...".len()));
            let _ = std::io::stderr().flush();
        }
    }

    fn set_field_error(&self, field: Field, message: &str) {
        tracing::debug!(element = field.error_element(), message, "Field error text");
        if let Ok(mut state) = self.state.lock() {
            if message.is_empty() {
                state.field_errors.remove(&field);
            } else {
                state.field_errors.insert(field, message.to_string());
            }
        }
        if !message.is_empty() {
            eprintln!("\r{}: {}", field.label(), message);
        }
    }

    fn animate_counter(&self, counter: Counter, value: u64) {
        println!("{:<16} {:>10}", counter.label(), value);
    }
}

impl Navigator for TerminalView {
    fn navigate(&self, page: Page) {
        if let Ok(mut state) = self.state.lock() {
            state.page = Some(page);
        }
        tracing::debug!(%page, "Navigating");
    }
}
