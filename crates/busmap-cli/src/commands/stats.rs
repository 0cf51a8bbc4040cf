//! Stats command handler: answer the document's stat requests.

use std::path::Path;

use anyhow::{Context, Result};

use busmap_lib::Session;

use super::{read_input, write_output};

pub fn handle_stats(input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let document = read_input(input)?;
    let session = Session::from_input(&document).context("failed to process request document")?;
    let responses = session.answer_stats();
    write_output(output, &responses.to_string())
}
