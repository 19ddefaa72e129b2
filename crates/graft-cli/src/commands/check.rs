//! Handler for `graft check`.

use miette::Result;

use graft_ops::ops_check;
use graft_ops::workspace::Workspace;
use graft_util::errors::GraftError;
use graft_util::progress;

pub async fn exec(verbose: bool) -> Result<()> {
    let ws = Workspace::discover(&super::current_dir()?)?;
    if verbose {
        progress::status("Checking", &ws.root().display().to_string());
    }

    let report = ops_check::check(&ws).await?;

    for id in &report.not_found {
        progress::status_warn("Not found", &id.to_string());
    }
    for (id, file) in &report.missing_files {
        progress::status_warn("Missing", &format!("{id}: {}", file.display()));
    }

    let problems = report.not_found.len() + report.missing_files.len();
    if problems > 0 {
        return Err(GraftError::Resolution {
            message: format!("{problems} artifacts could not be resolved"),
        }
        .into());
    }

    progress::status(
        "Checked",
        &format!(
            "{} artifacts of {} components",
            report.resolved, report.components
        ),
    );
    Ok(())
}
