//! Handler for `graft parse`.

use miette::Result;

use graft_ops::ops_select;

pub fn exec(selector: &str, verbose: bool) -> Result<()> {
    let matcher = ops_select::matcher(&super::current_dir()?)?;
    let summary = ops_select::parse(&matcher, selector)?;

    println!("{} {}", summary.kind, summary.canonical);
    if verbose {
        println!("dynamic: {}", summary.dynamic);
        println!("requires metadata: {}", summary.requires_metadata);
    }
    Ok(())
}
