// Copyright 2026, the t67xx_i2c authors
//
// Licensed under the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>,
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Prediction of when the sensor has warmed up enough to trust.
//!
//! From the datasheet:
//!
//!   "The sensor is capable of responding to commands after power on, but
//!    operational accuracy of sensor won't happen until 120 sec have
//!    elapsed. The sensor will reach full accuracy / warm up after 10 min.
//!    of operation."
//!
//! The model assumes the sensor was powered together with the host and has
//! not been power-cycled since, so the warm-up clock starts at system boot.
//! The boot timestamp comes from the `btime` line of `/proc/stat`, which
//! makes this Linux-only; where that file does not exist the boot time is
//! reported as unknown and the warm-up is treated as already elapsed.

use log::debug;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Warm-up interval after power-on, per the datasheet.
pub const WARMUP: Duration = Duration::from_secs(600);

const PROC_STAT: &str = "/proc/stat";

///
/// Accuracy model errors. A missing boot time source is not an error (the
/// boot time is simply unknown); a source that exists but cannot be read
/// or parsed is.
///
#[derive(Debug, thiserror::Error)]
pub enum AccuracyError {
    /// The boot time source exists but reading it failed.
    #[error("could not read the boot time source: {0}")]
    Io(#[from] io::Error),
    /// The btime line exists but does not hold a decimal integer.
    #[error("malformed btime line in the boot time source: {0:?}")]
    MalformedBtime(String),
}

/// Predicts whether the warm-up interval has elapsed since system boot.
///
/// Stateless: every query re-reads the boot time source and the system
/// clock, so repeated calls stay consistent with wall-clock time.
pub struct Accuracy {
    stat_path: PathBuf,
}

impl Accuracy {
    /// Model reading the boot time from `/proc/stat`.
    pub fn new() -> Self {
        Self::with_stat_path(PROC_STAT)
    }

    /// Model reading the boot time from an alternate stat file. Useful in
    /// tests and in containers where `/proc/stat` is masked.
    pub fn with_stat_path(path: impl AsRef<Path>) -> Self {
        Accuracy {
            stat_path: path.as_ref().to_path_buf(),
        }
    }

    /// The system boot time in seconds since the Unix epoch, or `None` if
    /// the boot time source (or its btime line) does not exist.
    ///
    pub fn seconds_since_boot(&self) -> Result<Option<u64>, AccuracyError> {
        let file = match File::open(&self.stat_path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Could not read {}: {}", self.stat_path.display(), e);
                return Ok(None);
            }
            Err(e) => return Err(AccuracyError::Io(e)),
        };

        for line in BufReader::new(file).lines() {
            let line = line?;
            if let Some(rest) = line.strip_prefix("btime ") {
                let seconds = rest
                    .trim()
                    .parse::<u64>()
                    .map_err(|_| AccuracyError::MalformedBtime(line.clone()))?;
                return Ok(Some(seconds));
            }
        }

        Ok(None)
    }

    /// How much of the warm-up interval is left, saturating at zero.
    ///
    pub fn remaining_warmup(&self) -> Result<Duration, AccuracyError> {
        let boot_time = self.seconds_since_boot()?;
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or(Duration::ZERO)
            .as_secs();
        Ok(remaining_from(boot_time, now))
    }

    /// Whether the sensor has reached its full accuracy.
    ///
    pub fn is_fully_accurate(&self) -> Result<bool, AccuracyError> {
        Ok(self.remaining_warmup()?.is_zero())
    }

    /// Sleep until the warm-up interval has elapsed, or return immediately
    /// if it already has.
    ///
    /// Blocks for up to 10 minutes and cannot be cancelled, so run it on a
    /// dedicated thread if the caller has anything better to do in the
    /// meantime; the crate-level example shows one way to signal
    /// completion back.
    ///
    pub fn wait_until_fully_accurate(&self) -> Result<(), AccuracyError> {
        let remaining = self.remaining_warmup()?;
        if remaining.is_zero() {
            debug!("System boot was more than 10 minutes ago, sensor should be at full accuracy");
            return Ok(());
        }

        debug!(
            "System boot was less than 10 minutes ago, sleeping for {} seconds until full sensor accuracy",
            remaining.as_secs()
        );
        thread::sleep(remaining);
        Ok(())
    }
}

impl Default for Accuracy {
    fn default() -> Self {
        Self::new()
    }
}

/// Warm-up time left given a boot timestamp and the current time, both in
/// seconds since the epoch. An unknown boot time counts as elapsed.
fn remaining_from(boot_time: Option<u64>, now: u64) -> Duration {
    match boot_time {
        None => Duration::ZERO,
        Some(boot) => Duration::from_secs((boot + WARMUP.as_secs()).saturating_sub(now)),
    }
}
