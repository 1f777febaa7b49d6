//! Command implementations for recon-cli

pub mod check;
pub mod hydra;
pub mod init;
pub mod list;
pub mod plan;
pub mod run;
pub mod show;

pub use check::run_check;
pub use hydra::{HydraArgs, run_hydra};
pub use init::run_init;
pub use list::run_list_tools;
pub use plan::run_plan;
pub use run::{RunArgs, run_scan};
pub use show::run_show;

use recon_tools::ToolCategory;

use crate::error::Result;

/// Categories selected by an optional `--category` flag; all when absent.
pub(crate) fn selected_categories(category: Option<&str>) -> Result<Vec<ToolCategory>> {
    match category {
        Some(name) => Ok(vec![ToolCategory::parse(name)?]),
        None => Ok(ToolCategory::ALL.to_vec()),
    }
}

/// Drive a future to completion on a single-threaded runtime.
pub(crate) fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}
