//! Terminal rendering for toasts and form state.

use std::time::Duration;

use client_core::{FormState, Notifier};
use shared::validation::ValidationErrors;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

pub fn render_toast(kind: ToastKind, message: &str, display_for: Duration) -> String {
    let tag = match kind {
        ToastKind::Success => "ok",
        ToastKind::Error => "error",
    };
    format!("[{tag}] {message} ({}s)", display_for.as_secs())
}

/// Prints toasts on stderr, one line each, in the order they are raised.
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify_success(&self, message: &str, display_for: Duration) {
        eprintln!("{}", render_toast(ToastKind::Success, message, display_for));
    }

    fn notify_error(&self, message: &str, display_for: Duration) {
        eprintln!("{}", render_toast(ToastKind::Error, message, display_for));
    }
}

pub fn render_slots(state: &FormState) -> String {
    if state.available_times.is_empty() {
        return "No available times for this date.".to_string();
    }

    let mut out = String::from("Available times");
    if !state.min_time.is_empty() {
        out.push_str(&format!(" (after {})", state.min_time));
    }
    out.push(':');
    for (index, slot) in state.available_times.iter().enumerate() {
        out.push_str(&format!("\n  {:>2}) {slot}", index + 1));
    }
    out
}

pub fn render_field_errors(errors: &ValidationErrors) -> String {
    errors
        .errors
        .iter()
        .map(|error| format!("  ! {error}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Accepts either a 1-based menu number or the slot label itself.
pub fn resolve_time_choice(input: &str, offered: &[String]) -> String {
    let input = input.trim();
    input
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|index| offered.get(index))
        .cloned()
        .unwrap_or_else(|| input.to_string())
}
