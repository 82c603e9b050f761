//! Terminal colors for CLI output.
//!
//! Respects `NO_COLOR`, `FORCE_COLOR`, and TTY detection through
//! `owo-colors`' `if_supports_color()`. `--no-color` sets an in-process
//! override on top of that.

use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::OwoColorize;
use owo_colors::Stream::{self, Stderr, Stdout};

static NO_COLOR_FLAG: AtomicBool = AtomicBool::new(false);

/// Call once from main.rs when `--no-color` is passed.
pub fn set_no_color() {
    NO_COLOR_FLAG.store(true, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy)]
struct Rgb {
    r: u8,
    g: u8,
    b: u8,
}

impl Rgb {
    const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as u8,
            g: ((hex >> 8) & 0xFF) as u8,
            b: (hex & 0xFF) as u8,
        }
    }
}

const ACCENT: Rgb = Rgb::from_hex(0x7CB4C8);
const SUCCESS: Rgb = Rgb::from_hex(0x6B8F5E);
const WARNING: Rgb = Rgb::from_hex(0xC49A5C);
const DANGER: Rgb = Rgb::from_hex(0xB87060);
const MUTED: Rgb = Rgb::from_hex(0x5C6370);

fn paint(stream: Stream, text: &str, rgb: Rgb) -> String {
    if NO_COLOR_FLAG.load(Ordering::Relaxed) {
        return text.to_string();
    }
    text.if_supports_color(stream, |t| t.truecolor(rgb.r, rgb.g, rgb.b))
        .to_string()
}

/// URLs, subject ids, timestamps.
pub fn accent(text: &str) -> String {
    paint(Stdout, text, ACCENT)
}

pub fn success(text: &str) -> String {
    paint(Stdout, text, SUCCESS)
}

pub fn muted(text: &str) -> String {
    paint(Stdout, text, MUTED)
}

/// Error prefix on stderr.
pub fn error(text: &str) -> String {
    paint(Stderr, text, DANGER)
}

/// Warning prefix on stderr.
pub fn warning(text: &str) -> String {
    paint(Stderr, text, WARNING)
}

/// Secondary info on stderr.
pub fn hint(text: &str) -> String {
    paint(Stderr, text, MUTED)
}
