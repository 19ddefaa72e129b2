//! Handler for `graft select`.

use miette::Result;

use graft_ops::ops_select;
use graft_util::errors::GraftError;

pub fn exec(selector: &str, candidates: &[String]) -> Result<()> {
    let matcher = ops_select::matcher(&super::current_dir()?)?;
    match ops_select::select(&matcher, selector, candidates)? {
        Some(version) => {
            println!("{version}");
            Ok(())
        }
        None => Err(GraftError::Resolution {
            message: format!("no candidate matches '{selector}'"),
        }
        .into()),
    }
}
