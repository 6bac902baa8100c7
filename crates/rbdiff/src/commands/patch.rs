use std::path::PathBuf;

use rbdiff_operations::operations::{PatchInput, PatchOperation};

use crate::environment::{Environment, GlobalArgs};
use crate::error::Result;

pub(crate) fn run(
    globals: GlobalArgs,
    patch_file: PathBuf,
    strip: Option<u32>,
    base_dir: Option<String>,
) -> Result<()> {
    let environment = Environment::load(globals)?;
    let detected = environment.scan(false)?;

    let input = PatchInput {
        patch_file,
        base_dir,
        strip: strip.or_else(|| environment.config.patch().strip()),
    };
    let outcome =
        PatchOperation::new(detected.client.as_ref(), &detected.repository).execute(&input)?;

    print!("{}", outcome.output);
    if outcome.empty_files_registered {
        println!("Registered empty files with {}.", detected.client.name());
    }
    Ok(())
}
