//! One-shot scheduled mode switches via the user's crontab.
//!
//! Runs before any cloud connection is made; the scheduled invocation
//! authenticates on its own when it fires.

use chrono::Local;
use secrecy::ExposeSecret;

use giga_core::{Crontab, CrontabEntry, next_run, parse_hhmm};

use crate::cli::{CronArgs, CronCommand, GlobalOpts};
use crate::config::Resolved;
use crate::error::CliError;
use crate::output;

/// Trailing-comment tag marking crontab lines as ours.
const CRON_TAG: &str = "gigactl-cron";

pub fn handle(args: CronArgs, resolved: &Resolved, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        CronCommand::Add { at, mode } => {
            let mode = mode
                .or(resolved.default_mode)
                .ok_or_else(|| CliError::Validation {
                    field: "mode".into(),
                    reason: "no mode given; pass --mode or set modus in the configuration file"
                        .into(),
                })?;
            let time = parse_hhmm(&at)?;
            let run_at = next_run(Local::now().naive_local(), time);

            let exe = std::env::current_exe()?;
            let mut argv = vec![exe.display().to_string()];
            // Credentials from a config file are readable by the cron
            // invocation too; only flag/env credentials get embedded.
            if !resolved.creds_from_file {
                argv.push("-u".into());
                argv.push(resolved.session.username.clone());
                argv.push("-p".into());
                argv.push(resolved.session.password.expose_secret().to_string());
            }
            argv.push("mode".into());
            argv.push(mode.as_str().into());

            Crontab::install(&CrontabEntry {
                run_at,
                argv,
                tag: CRON_TAG.into(),
            })?;

            let color = output::should_color(&global.color);
            if !global.quiet {
                println!(
                    "Cron job scheduled | Modus will be set to {} on {}",
                    output::state(mode.as_str(), color),
                    run_at.format("%A %d %B %Y %H:%M"),
                );
            }
            Ok(())
        }
        CronCommand::Remove => {
            let removed = Crontab::remove(CRON_TAG)?;
            if !global.quiet {
                if removed == 0 {
                    println!("No cron jobs found for removal");
                } else {
                    println!("Removed {removed} cron job(s)");
                }
            }
            Ok(())
        }
    }
}
