//! Plan command handler.
//!
//! Shows the backend command line a download would run. Nothing is spawned.

use anyhow::Result;
use castgrab_core::BackendPlan;

use crate::bootstrap::CliContext;
use crate::commands::RequestArgs;

pub fn execute(ctx: &CliContext, args: RequestArgs, json: bool) -> Result<()> {
    let plan = ctx.downloader.plan(&args.into_request());
    println!("{}", render(&plan, json)?);
    Ok(())
}

pub fn render(plan: &BackendPlan, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(plan)?)
    } else {
        Ok(plan.command_line())
    }
}
