use colored::Colorize;
use std::fmt;

use crate::utils::format::AmountTone;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()).bold().to_string(),
        MessageKind::Warning => format!("WARNING: [!] {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("ERROR: [x] {text}").bright_red().to_string(),
        MessageKind::Info => text,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        MessageKind::Warning | MessageKind::Error => eprintln!("{formatted}"),
        MessageKind::Info => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Colours an already formatted amount by its tone.
pub fn toned(text: &str, tone: AmountTone) -> String {
    match tone {
        AmountTone::Positive => text.green().to_string(),
        AmountTone::Negative => text.red().to_string(),
        AmountTone::Neutral => text.dimmed().to_string(),
    }
}
