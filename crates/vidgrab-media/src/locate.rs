//! Locating the yt-dlp executable.

use std::path::{Path, PathBuf};

use crate::error::{MediaError, MediaResult};

/// Name of the extraction executable.
#[cfg(windows)]
pub const TOOL_NAME: &str = "yt-dlp.exe";
#[cfg(not(windows))]
pub const TOOL_NAME: &str = "yt-dlp";

/// Secondary fixed install directory checked after the working
/// directory (where the container image installs the tool).
const SYSTEM_INSTALL_DIR: &str = "/usr/local/bin";

/// Ordered lookup for the extraction executable.
///
/// Resolution runs per call against an explicit candidate list; there
/// is no cached global. The first candidate that exists wins, then the
/// bare name is resolved through PATH. A failed lookup is fatal for the
/// request and is never retried.
#[derive(Debug, Clone)]
pub struct ToolLocator {
    candidates: Vec<PathBuf>,
    path_fallback: bool,
}

impl Default for ToolLocator {
    fn default() -> Self {
        let mut candidates = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            candidates.push(cwd.join(TOOL_NAME));
        }
        candidates.push(Path::new(SYSTEM_INSTALL_DIR).join(TOOL_NAME));
        Self {
            candidates,
            path_fallback: true,
        }
    }
}

impl ToolLocator {
    /// Locator over an explicit candidate list with no PATH fallback.
    /// Tests use this to stand in a stub executable, or none at all.
    pub fn with_candidates(candidates: Vec<PathBuf>) -> Self {
        Self {
            candidates,
            path_fallback: false,
        }
    }

    /// Resolve the executable path.
    pub fn locate(&self) -> MediaResult<PathBuf> {
        for candidate in &self.candidates {
            if candidate.is_file() {
                return Ok(candidate.clone());
            }
        }

        if self.path_fallback {
            if let Ok(found) = which::which(TOOL_NAME) {
                return Ok(found);
            }
        }

        Err(MediaError::ToolNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_no_candidates_is_tool_not_found() {
        let locator = ToolLocator::with_candidates(Vec::new());
        assert!(matches!(locator.locate(), Err(MediaError::ToolNotFound)));
    }

    #[test]
    fn test_missing_candidates_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let present = dir.path().join(TOOL_NAME);
        fs::write(&present, b"#!/bin/sh\n").unwrap();

        let locator = ToolLocator::with_candidates(vec![missing, present.clone()]);
        assert_eq!(locator.locate().unwrap(), present);
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        fs::write(&first, b"#!/bin/sh\n").unwrap();
        fs::write(&second, b"#!/bin/sh\n").unwrap();

        let locator = ToolLocator::with_candidates(vec![first.clone(), second]);
        assert_eq!(locator.locate().unwrap(), first);
    }

    #[test]
    fn test_directory_is_not_a_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let locator = ToolLocator::with_candidates(vec![dir.path().to_path_buf()]);
        assert!(matches!(locator.locate(), Err(MediaError::ToolNotFound)));
    }
}
