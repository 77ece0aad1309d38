use serde::{Deserialize, Serialize};

use crate::{saved::SavedResult, RigbenchError, Result};

pub const MIN_MATRIX_DEVICES: usize = 2;
pub const MIN_MATRIX_GAMES: usize = 1;

/// Device x game batch request with blank entries removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixJob {
    devices: Vec<String>,
    games: Vec<String>,
}

impl MatrixJob {
    /// Drops blank entries, then checks the batch is large enough. Repeated
    /// entries are kept and each runs its own combinations.
    pub fn new<D, G>(devices: D, games: G) -> Result<Self>
    where
        D: IntoIterator,
        D::Item: AsRef<str>,
        G: IntoIterator,
        G::Item: AsRef<str>,
    {
        let devices = non_blank(devices);
        let games = non_blank(games);
        if games.len() < MIN_MATRIX_GAMES || devices.len() < MIN_MATRIX_DEVICES {
            return Err(RigbenchError::Validation(
                "Please provide at least one game and two devices.".into(),
            ));
        }
        Ok(Self { devices, games })
    }

    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    pub fn games(&self) -> &[String] {
        &self.games
    }

    pub fn total_combinations(&self) -> usize {
        self.devices.len() * self.games.len()
    }
}

/// Entries are kept as typed; only whitespace-only ones are dropped.
fn non_blank<I>(entries: I) -> Vec<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    entries
        .into_iter()
        .map(|entry| entry.as_ref().to_string())
        .filter(|entry| !entry.trim().is_empty())
        .collect()
}

/// Result of one batch run: successful analyses plus a readable error log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatrixOutcome {
    pub results: Vec<SavedResult>,
    pub errors: Vec<String>,
}

impl MatrixOutcome {
    /// Every combination failed; distinct from a rejected request.
    pub fn is_total_failure(&self) -> bool {
        self.results.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_small_batches() {
        assert!(MatrixJob::new(["Device A"], ["Game"]).is_err());
        assert!(MatrixJob::new(["Device A", "Device B"], Vec::<String>::new()).is_err());
        assert!(MatrixJob::new(["Device A", "  "], ["Game"]).is_err());
        assert!(MatrixJob::new(["Device A", "Device B"], ["Game"]).is_ok());
    }

    #[test]
    fn drops_blank_entries_only() {
        let job = MatrixJob::new(
            [" Pixel 8 ", "", "Galaxy S23", "\t"],
            ["Genshin Impact", " "],
        )
        .expect("valid job");
        assert_eq!(job.devices(), [" Pixel 8 ", "Galaxy S23"]);
        assert_eq!(job.games(), ["Genshin Impact"]);
        assert_eq!(job.total_combinations(), 2);
    }

    #[test]
    fn repeated_entries_each_count() {
        let job = MatrixJob::new(["Pixel 8", "Pixel 8"], ["Game"]).expect("two devices");
        assert_eq!(job.total_combinations(), 2);

        let job = MatrixJob::new(["Pixel 8", "Galaxy S23", "Pixel 8"], ["GameX", "GameX"])
            .expect("valid job");
        assert_eq!(job.devices().len(), 3);
        assert_eq!(job.games().len(), 2);
        assert_eq!(job.total_combinations(), 6);
    }
}
