use anyhow::Result;
use colored::Colorize;

use super::super::args::ExtractArgs;
use super::super::exit_status::ExitStatus;
use super::super::report::{print_failures, print_summary, print_unparsable};
use crate::core::ExtractContext;

pub fn extract(args: &ExtractArgs) -> Result<ExitStatus> {
    let mut ctx = ExtractContext::new(args)?;
    print_unparsable(&ctx.unparsable_files, ctx.verbose);

    let extraction = ctx.extract()?;
    print_failures(&extraction.failures);

    // Keys of failed or skipped files are unknown, so none of them can be
    // called obsolete.
    let partial = !extraction.failures.is_empty() || !ctx.unparsable_files.is_empty();
    if partial && ctx.config.clean {
        eprintln!(
            "{} some files were not extracted, obsolete keys are kept",
            "warning:".bold().yellow()
        );
        ctx.config.clean = false;
    }

    let catalogs = ctx.update_catalogs(&extraction.collection, args.dry_run)?;
    print_summary(&extraction, &catalogs, args.dry_run);

    if extraction.failures.is_empty() {
        Ok(ExitStatus::Success)
    } else {
        Ok(ExitStatus::Failure)
    }
}
