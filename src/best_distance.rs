//! Best distance record
//!
//! The simulation only reports a final score; this is the collaborator that
//! keeps the single best-distance value across runs.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Best distance reached across all runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BestDistance {
    pub best: u64,
}

impl BestDistance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns true if it set a new best.
    pub fn record(&mut self, score: u64) -> bool {
        if score > self.best {
            log::info!("New best distance: {} (was {})", score, self.best);
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load from a JSON file. Missing or corrupt files start fresh.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<BestDistance>(&json) {
                Ok(best) => {
                    log::info!("Loaded best distance {}", best.best);
                    best
                }
                Err(e) => {
                    log::warn!("Ignoring corrupt best distance file {}: {}", path.display(), e);
                    Self::new()
                }
            },
            Err(_) => {
                log::info!("No best distance found, starting fresh");
                Self::new()
            }
        }
    }

    /// Write to a JSON file, replacing any previous record
    pub fn save_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::debug!("Best distance saved ({})", self.best);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("lane_runner_{}_{}.json", name, std::process::id()))
    }

    #[test]
    fn test_record_only_improvements() {
        let mut best = BestDistance::new();
        assert!(!best.record(0));
        assert!(best.record(120));
        assert!(!best.record(80));
        assert!(!best.record(120));
        assert!(best.record(121));
        assert_eq!(best.best, 121);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("roundtrip");
        let mut best = BestDistance::new();
        best.record(4321);
        best.save_to(&path).unwrap();

        assert_eq!(BestDistance::load_from(&path).best, 4321);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_starts_fresh() {
        let path = temp_path("corrupt");
        std::fs::write(&path, "{ \"best\": \"lots\" }").unwrap();
        assert_eq!(BestDistance::load_from(&path), BestDistance::new());
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_starts_fresh() {
        assert_eq!(BestDistance::load_from(temp_path("missing")).best, 0);
    }
}
