//! Map command handler: render the transit network as SVG.

use std::path::Path;

use anyhow::{Context, Result};

use busmap_lib::Session;

use super::{read_input, write_output};

pub fn handle_map(input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let document = read_input(input)?;
    let session = Session::from_input(&document).context("failed to process request document")?;
    let map = session
        .render_map()
        .context("failed to render the transit map")?;
    write_output(output, &map.to_string())
}
