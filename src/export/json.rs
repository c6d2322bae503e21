//! JSON import/export of a learner snapshot.
//! Lets challenge progress, per-mode performance and the wallet move between
//! devices as a single file.

use crate::database::db::Wallet;
use crate::models::{ChallengeProgress, Mode, PerfStat};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Write};

/// Everything worth carrying to another device.
#[derive(Default, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub progress: ChallengeProgress,
    #[serde(default)]
    pub perf: HashMap<Mode, PerfStat>,
    #[serde(default)]
    pub wallet: Wallet,
}

/// Exports a snapshot to a JSON file at the specified path.
/// Returns an error if file creation or writing fails.
pub fn export_json_to_path(
    snapshot: &ProgressSnapshot,
    path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_string = serde_json::to_string_pretty(snapshot)?;
    let mut file = File::create(path)?;
    file.write_all(json_string.as_bytes())?;
    Ok(())
}

/// Imports a snapshot from a JSON file.
/// Returns an error if the file doesn't exist or contains invalid JSON.
pub fn import_json(filename: &str) -> Result<ProgressSnapshot, Box<dyn std::error::Error>> {
    let mut file = File::open(filename)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let snapshot: ProgressSnapshot = serde_json::from_str(&contents)?;
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::fs;

    fn create_test_snapshot() -> ProgressSnapshot {
        let now = Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap();
        let mut progress = ChallengeProgress::current(None, now);
        progress.apply_answer(Mode::Addition, true);
        let mut perf = HashMap::new();
        perf.insert(Mode::Addition, PerfStat { right: 1, total: 1 });
        ProgressSnapshot {
            progress,
            perf,
            wallet: Wallet { coins: 15, xp: 40 },
        }
    }

    #[test]
    fn test_export_json_to_path() {
        let snapshot = create_test_snapshot();
        let test_file = "test_export_snapshot.json";

        let result = export_json_to_path(&snapshot, test_file);
        assert!(result.is_ok());
        assert!(fs::metadata(test_file).is_ok(), "File should exist");

        let _ = fs::remove_file(test_file);
    }

    #[test]
    fn test_export_and_import_roundtrip() {
        let original = create_test_snapshot();
        let test_file = "test_roundtrip_snapshot.json";

        export_json_to_path(&original, test_file).unwrap();
        let imported = import_json(test_file).unwrap();

        assert_eq!(imported.progress.day_key, original.progress.day_key);
        assert_eq!(imported.progress.daily_stats.right(Mode::Addition), 1);
        assert_eq!(imported.perf.get(&Mode::Addition).unwrap().total, 1);
        assert_eq!(imported.wallet.coins, 15);

        let _ = fs::remove_file(test_file);
    }

    #[test]
    fn test_import_nonexistent_file() {
        let result = import_json("nonexistent_file_xyz123.json");
        assert!(result.is_err());
    }

    #[test]
    fn test_import_invalid_json() {
        let test_file = "test_invalid_snapshot.json";
        fs::write(test_file, "{ this is not valid json }").unwrap();

        let result = import_json(test_file);
        assert!(result.is_err());

        let _ = fs::remove_file(test_file);
    }

    #[test]
    fn test_import_partial_snapshot_uses_defaults() {
        let test_file = "test_partial_snapshot.json";
        fs::write(test_file, "{\"wallet\": {\"coins\": 3}}").unwrap();

        let snapshot = import_json(test_file).unwrap();
        assert_eq!(snapshot.wallet.coins, 3);
        assert_eq!(snapshot.wallet.xp, 0);
        assert!(snapshot.progress.day_key.is_empty());

        let _ = fs::remove_file(test_file);
    }
}
