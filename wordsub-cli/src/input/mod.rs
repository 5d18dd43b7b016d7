//! Input handling module

use crate::error::CliError;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

/// Open a file for reading, or stdin when no path is given
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => match File::open(path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(CliError::FileNotFound(path.display().to_string()).into())
            }
            Err(e) => {
                Err(e).with_context(|| format!("Failed to open input: {}", path.display()))
            }
        },
        None => Ok(Box::new(io::stdin().lock())),
    }
}
