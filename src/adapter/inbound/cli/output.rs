//! Terminal output.
//!
//! Human-readable lines by default; with `--json` every call emits one JSON
//! object per line instead so the output can be piped.

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;
use serde_json::{json, Value};

static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Apply the global `--json` flag.
pub fn configure(json: bool) {
    JSON_MODE.store(json, Ordering::Relaxed);
}

#[must_use]
pub fn is_json() -> bool {
    JSON_MODE.load(Ordering::Relaxed)
}

fn emit_json_line(kind: &str, payload: Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Print the application header with name and version.
pub fn header(version: &str) {
    if is_json() {
        return;
    }
    println!("{} {}", "adscout".bold(), version.dimmed());
    println!();
}

/// Print a section header.
pub fn section(title: &str) {
    if is_json() {
        emit_json_line("section", json!({ "title": title }));
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    if is_json() {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    println!("  {:<14} {}", label.dimmed(), value);
}

pub fn success(message: &str) {
    if is_json() {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

pub fn warning(message: &str) {
    if is_json() {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

pub fn error(message: &str) {
    if is_json() {
        eprintln!(
            "{}",
            json!({ "type": "error", "payload": { "message": message } })
        );
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

/// Print a whole result document (JSON mode only).
pub fn json_output(value: Value) {
    println!("{value}");
}

/// Print a rendered table, indented to line up with fields.
pub fn table(rendered: &str) {
    for line in rendered.lines() {
        println!("  {line}");
    }
}
