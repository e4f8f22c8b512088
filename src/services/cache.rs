// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::{debug, warn};

use crate::domain::CachedResult;
use crate::error::Result;

/// Sentinel file holding the last generated or previewed message.
pub const MESSAGE_FILE: &str = ".aigcm_msg";

/// Single-slot cache of the last message, one per working directory.
///
/// The sentinel file's modification time is the only timestamp. There is no
/// locking; concurrent runs in the same directory are last-write-wins.
pub struct RecentMessageCache {
    path: PathBuf,
    threshold: Duration,
}

impl RecentMessageCache {
    pub fn new(dir: &Path, threshold: Duration) -> Self {
        Self {
            path: dir.join(MESSAGE_FILE),
            threshold,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current sentinel contents, fresh or not. Invalid UTF-8 is replaced
    /// rather than rejected.
    pub fn read(&self) -> Result<Option<CachedResult>> {
        let Some(stored_at) = self.stored_at()? else {
            return Ok(None);
        };

        let bytes = std::fs::read(&self.path)?;
        Ok(Some(CachedResult {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            stored_at,
        }))
    }

    /// A reusable message, if one was stored within the threshold. Dry runs
    /// never reuse: they always preview a fresh generation.
    pub fn lookup(&self, dry: bool) -> Result<Option<CachedResult>> {
        if dry {
            debug!("dry run, recent message ignored");
            return Ok(None);
        }
        self.lookup_at(SystemTime::now())
    }

    /// Only the timestamp of a stale entry is looked at; its contents are
    /// left for the next `store` to replace.
    pub fn lookup_at(&self, now: SystemTime) -> Result<Option<CachedResult>> {
        let Some(stored_at) = self.stored_at()? else {
            return Ok(None);
        };

        if !self.is_fresh_at(stored_at, now) {
            debug!(path = %self.path.display(), "stored message is stale");
            return Ok(None);
        }

        match std::fs::read(&self.path) {
            Ok(bytes) => {
                debug!(path = %self.path.display(), "reusing recent message");
                Ok(Some(CachedResult {
                    text: String::from_utf8_lossy(&bytes).into_owned(),
                    stored_at,
                }))
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "recent message unreadable, regenerating");
                Ok(None)
            }
        }
    }

    fn stored_at(&self) -> Result<Option<SystemTime>> {
        match std::fs::metadata(&self.path) {
            Ok(metadata) => Ok(Some(metadata.modified()?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Fresh while strictly younger than the threshold. A timestamp in the
    /// future counts as age zero.
    pub fn is_fresh_at(&self, stored_at: SystemTime, now: SystemTime) -> bool {
        let age = now.duration_since(stored_at).unwrap_or(Duration::ZERO);
        age < self.threshold
    }

    /// Overwrite the sentinel file in place.
    pub fn store(&self, text: &str) -> Result<()> {
        std::fs::write(&self.path, text)?;
        debug!(path = %self.path.display(), bytes = text.len(), "message stored");
        Ok(())
    }
}
