use rbdiff_operations::operations::{DiffInput, DiffOperation};
use tracing::debug;

use crate::environment::{Environment, GlobalArgs};
use crate::error::Result;

pub(crate) fn run(
    globals: GlobalArgs,
    revisions: Vec<String>,
    include_files: Vec<String>,
    parent: Option<&str>,
) -> Result<()> {
    let environment = Environment::load(globals)?;
    let detected = environment.scan(parent.is_some())?;
    if let Some(parent) = parent {
        debug!("Parent branch: {parent}");
    }

    let output = DiffOperation::new(detected.client.as_ref()).execute(&DiffInput {
        revisions,
        include_files,
    })?;

    if let Some(diff) = output.diff() {
        print!("{diff}");
    }
    Ok(())
}
