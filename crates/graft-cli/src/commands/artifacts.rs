//! Handler for `graft artifacts`.

use miette::Result;

use graft_ops::ops_artifacts;
use graft_ops::workspace::Workspace;

pub fn exec(build_path: &str, configuration: &str) -> Result<()> {
    let ws = Workspace::discover(&super::current_dir()?)?;
    let artifacts = ops_artifacts::module_artifacts(&ws, build_path, configuration)?;

    if artifacts.is_empty() {
        println!("No artifacts in configuration '{configuration}' of {build_path}");
        return Ok(());
    }
    for artifact in &artifacts {
        match artifact.file() {
            Some(file) => println!("{}  {}", artifact.id.name, file.display()),
            None => println!("{}", artifact.id.name),
        }
    }
    Ok(())
}
