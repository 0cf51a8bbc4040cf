// Module exports for CLI subcommands.
//
// Each module handles one subcommand; main.rs stays focused on argument
// parsing and dispatch.

pub mod map;
pub mod stats;

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

/// Read the request document from a file or standard input.
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read request document from {}", path.display())),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read request document from standard input")?;
            Ok(buffer)
        }
    }
}

/// Write the result to a file or standard output.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, text)
            .with_context(|| format!("failed to write output to {}", path.display())),
        None => {
            println!("{text}");
            Ok(())
        }
    }
}
