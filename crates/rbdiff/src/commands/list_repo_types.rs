use rbdiff_operations::operations::ListRepoTypesOperation;

use crate::environment::{Environment, GlobalArgs};
use crate::error::Result;

pub(crate) fn run(globals: GlobalArgs) -> Result<()> {
    let environment = Environment::load(globals)?;

    for entry in ListRepoTypesOperation::new(&environment.registry).execute(&environment.context) {
        let marker = if entry.detected { '*' } else { ' ' };
        println!("{marker} {}", entry.name);
    }
    Ok(())
}
