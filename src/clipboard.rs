use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::io::{self, Write};

pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Copies through the terminal with an OSC 52 escape, so it also works over SSH.
/// Terminals that don't support OSC 52 silently ignore it.
#[derive(Default)]
pub struct Osc52Clipboard;

impl Clipboard for Osc52Clipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut out = io::stdout();
        out.write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| out.flush())
            .context("writing OSC 52 sequence")
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}
