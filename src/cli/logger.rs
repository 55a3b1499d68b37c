// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Minimal stderr logger for the `log` facade

use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

/// Writes `LEVEL target: message` lines to stderr
pub struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!(
            "{} {}: {}",
            level_tag(record.level()),
            record.target().bright_black(),
            record.args()
        );
    }

    fn flush(&self) {}
}

fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Error => "ERROR".red().bold(),
        Level::Warn => "WARN ".yellow().bold(),
        Level::Info => "INFO ".green(),
        Level::Debug => "DEBUG".blue(),
        Level::Trace => "TRACE".bright_black(),
    }
}

/// Level for the CLI verbosity flags
pub fn level_for(verbose: bool, quiet: bool) -> LevelFilter {
    match (verbose, quiet) {
        (_, true) => LevelFilter::Error,
        (true, false) => LevelFilter::Debug,
        (false, false) => LevelFilter::Warn,
    }
}

/// Install the logger; fails if another logger is already set
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
