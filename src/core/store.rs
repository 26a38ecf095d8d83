use crate::core::{codec, export, Duration, RaceResult, Standing, Storage};
use crate::utils::error::{RaceError, Result};

/// In-memory race results, loaded from and saved to a [`Storage`].
///
/// Records keep their insertion order. Several records for the same
/// participant and sport may coexist; lookups return the first one.
pub struct RaceResultsStore<S: Storage> {
    storage: S,
    results: Vec<RaceResult>,
}

impl<S: Storage> RaceResultsStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            results: Vec::new(),
        }
    }

    pub fn with_results(storage: S, results: Vec<RaceResult>) -> Self {
        Self { storage, results }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Replaces the current results with the contents of `path`.
    ///
    /// Returns `false` if the file cannot be read or parsed; the current
    /// results are kept in that case.
    pub fn load_from_file(&mut self, path: &str) -> bool {
        match self.try_load_from_file(path) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("❌ {}", e);
                false
            }
        }
    }

    /// Same as [`load_from_file`](Self::load_from_file), returning the
    /// number of records loaded or a `LoadError`.
    pub fn try_load_from_file(&mut self, path: &str) -> Result<usize> {
        let load_error = |reason: String| RaceError::LoadError {
            path: path.to_string(),
            reason,
        };

        let data = self
            .storage
            .read_file(path)
            .map_err(|e| load_error(e.to_string()))?;
        let results = codec::decode_records(&data).map_err(|e| load_error(e.to_string()))?;

        let count = results.len();
        self.results = results;
        tracing::info!("📥 Loaded {} race results from {}", count, path);
        Ok(count)
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let save_error = |reason: String| RaceError::SaveError {
            path: path.to_string(),
            reason,
        };

        let data = codec::encode_records(&self.results).map_err(|e| save_error(e.to_string()))?;
        self.storage
            .write_file(path, &data)
            .map_err(|e| save_error(e.to_string()))?;

        tracing::info!("💾 Saved {} race results to {}", self.results.len(), path);
        Ok(())
    }

    pub fn export_csv(&self, path: &str) -> Result<()> {
        let csv = export::to_csv(&self.results)?;
        self.write_export(path, csv)
    }

    pub fn export_standings_csv(&self, path: &str) -> Result<()> {
        let csv = export::standings_to_csv(&self.standings())?;
        self.write_export(path, csv)
    }

    fn write_export(&self, path: &str, csv: String) -> Result<()> {
        self.storage
            .write_file(path, csv.as_bytes())
            .map_err(|e| RaceError::SaveError {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        tracing::info!("📤 Exported CSV to {}", path);
        Ok(())
    }

    /// `None` when nothing is recorded for this participant and sport.
    pub fn get_time_for_participant(&self, participant_id: &str, sport_type: &str) -> Option<Duration> {
        self.results
            .iter()
            .find(|r| r.matches(participant_id, sport_type))
            .map(|r| r.duration)
    }

    /// Sum over every sport; zero for an unknown participant.
    pub fn get_total_time_for_participant(&self, participant_id: &str) -> Duration {
        self.results
            .iter()
            .filter(|r| r.participant_id == participant_id)
            .map(|r| r.duration)
            .sum()
    }

    pub fn add_race_result(&mut self, result: RaceResult) {
        tracing::debug!(
            "Adding {} / {}: {}",
            result.participant_id,
            result.sport_type,
            result.duration
        );
        self.results.push(result);
    }

    pub fn results(&self) -> &[RaceResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn participants(&self) -> Vec<&str> {
        distinct(self.results.iter().map(|r| r.participant_id.as_str()))
    }

    pub fn sports(&self) -> Vec<&str> {
        distinct(self.results.iter().map(|r| r.sport_type.as_str()))
    }

    pub fn results_for_participant(&self, participant_id: &str) -> Vec<&RaceResult> {
        self.results
            .iter()
            .filter(|r| r.participant_id == participant_id)
            .collect()
    }

    /// Fastest first. Equal times keep insertion order.
    pub fn leaderboard(&self, sport_type: &str) -> Vec<&RaceResult> {
        let mut entries: Vec<&RaceResult> = self
            .results
            .iter()
            .filter(|r| r.sport_type == sport_type)
            .collect();
        entries.sort_by_key(|r| r.duration);
        entries
    }

    /// Overall totals, lowest first. Equal totals keep first-seen order.
    pub fn standings(&self) -> Vec<Standing> {
        let mut standings: Vec<Standing> = self
            .participants()
            .into_iter()
            .map(|id| Standing {
                participant_id: id.to_string(),
                total: self.get_total_time_for_participant(id),
                results: self.results.iter().filter(|r| r.participant_id == id).count(),
            })
            .collect();
        standings.sort_by_key(|s| s.total);
        standings
    }

    /// How far `participant_id` finished behind `reference_id` in one sport.
    ///
    /// `None` if either time is missing; `InvalidDuration` if
    /// `participant_id` was faster.
    pub fn time_gap(&self, participant_id: &str, reference_id: &str, sport_type: &str) -> Option<Result<Duration>> {
        let time = self.get_time_for_participant(participant_id, sport_type)?;
        let reference = self.get_time_for_participant(reference_id, sport_type)?;
        Some(time.minus(reference))
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for value in values {
        if !seen.contains(&value) {
            seen.push(value);
        }
    }
    seen
}
