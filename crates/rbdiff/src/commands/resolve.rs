use rbdiff_operations::operations::ResolveOperation;

use crate::environment::{Environment, GlobalArgs};
use crate::error::Result;

pub(crate) fn run(globals: GlobalArgs, revisions: &[String]) -> Result<()> {
    let environment = Environment::load(globals)?;
    let detected = environment.scan(false)?;

    let spec = ResolveOperation::new(detected.client.as_ref()).execute(revisions)?;

    println!("{}", serde_json::to_string_pretty(&spec)?);
    Ok(())
}
