pub mod analyze;
pub mod generate;

use anyhow::{Context, Result};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Read a file, or stdin for "-".
pub fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        return Ok(buf);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

/// Write `text` to `out`, or print it when no path is given.
pub fn emit(text: &str, out: Option<PathBuf>) -> Result<()> {
    if let Some(p) = out {
        if let Some(parent) = p.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&p, text).with_context(|| format!("writing {}", p.display()))?;
        eprintln!("✓ Wrote {}", p.display());
    } else {
        println!("{text}");
    }
    Ok(())
}
