//! Ranking and presentation order for completed matrix runs.
//!
//! Nothing here mutates the caller's results: every function works on borrowed
//! slices and hands back a fresh sequence.

use std::{cmp::Ordering, collections::HashMap};

use once_cell::sync::Lazy;
use regex::Regex;
use rigbench_types::saved::SavedResult;

mod comparison;

pub use comparison::{select_by_ids, ComparisonRow, ComparisonTable, MIN_COMPARISON_RESULTS};

pub const TOP_PERFORMERS: usize = 3;

static FIRST_NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit pattern"));

/// A result paired with its score position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedEntry<'a> {
    pub rank: usize,
    pub result: &'a SavedResult,
}

fn score_descending(results: &[SavedResult]) -> Vec<&SavedResult> {
    let mut by_score: Vec<&SavedResult> = results.iter().collect();
    // `sort_by` is stable: equal scores keep their input order.
    by_score.sort_by(|a, b| b.score().cmp(&a.score()));
    by_score
}

/// Assigns each result its 1-based position in a score-descending copy.
///
/// Positions are looked up by id, so equal scores get consecutive ranks in
/// input order rather than a shared rank.
pub fn rank(results: &[SavedResult]) -> Vec<RankedEntry<'_>> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    for (index, result) in score_descending(results).into_iter().enumerate() {
        positions.entry(result.id.as_str()).or_insert(index);
    }
    results
        .iter()
        .map(|result| RankedEntry {
            rank: positions.get(result.id.as_str()).copied().unwrap_or(0) + 1,
            result,
        })
        .collect()
}

/// Highest scoring results, independent of any table sort.
pub fn top_performers(results: &[SavedResult], limit: usize) -> Vec<&SavedResult> {
    let mut by_score = score_descending(results);
    by_score.truncate(limit);
    by_score
}

/// First run of digits in the first scenario's FPS text, e.g. "70-110 FPS" -> 70.
pub fn primary_fps(result: &SavedResult) -> u64 {
    result
        .analysis
        .primary_scenario()
        .and_then(|scenario| FIRST_NUMBER.find(&scenario.avg_fps))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(0)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Rank,
    GameName,
    DeviceLabel,
    PerformanceScore,
    PrimaryScenarioFps,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Rank,
        SortKey::GameName,
        SortKey::DeviceLabel,
        SortKey::PerformanceScore,
        SortKey::PrimaryScenarioFps,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Rank => "Rank",
            SortKey::GameName => "Game",
            SortKey::DeviceLabel => "Device",
            SortKey::PerformanceScore => "Score",
            SortKey::PrimaryScenarioFps => "Est. FPS",
        }
    }

    fn compare(self, a: &RankedEntry<'_>, b: &RankedEntry<'_>) -> Ordering {
        match self {
            SortKey::Rank => a.rank.cmp(&b.rank),
            SortKey::GameName => a.result.game_name.cmp(&b.result.game_name),
            SortKey::DeviceLabel => a.result.device_label().cmp(b.result.device_label()),
            SortKey::PerformanceScore => a.result.score().cmp(&b.result.score()),
            SortKey::PrimaryScenarioFps => primary_fps(a.result).cmp(&primary_fps(b.result)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// User-selected table order.
///
/// Re-selecting the active key flips direction; any other key starts
/// descending. Until a key is chosen the table shows scores descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    key: Option<SortKey>,
    direction: SortDirection,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, key: SortKey) {
        self.direction = if self.key == Some(key) && self.direction == SortDirection::Descending {
            SortDirection::Ascending
        } else {
            SortDirection::Descending
        };
        self.key = Some(key);
    }

    pub fn key(&self) -> SortKey {
        self.key.unwrap_or(SortKey::PerformanceScore)
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    /// Ranked results in this order; ties keep input order.
    pub fn apply<'a>(&self, results: &'a [SavedResult]) -> Vec<RankedEntry<'a>> {
        let key = self.key();
        let mut entries = rank(results);
        entries.sort_by(|a, b| {
            let ordering = key.compare(a, b);
            match self.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
        entries
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rigbench_types::{
        analysis::{AnalysisRecord, FpsScenario},
        hardware::HardwareSpec,
    };

    pub(crate) fn result(device: &str, game: &str, score: Option<u32>, fps: &[&str]) -> SavedResult {
        SavedResult::new(
            game,
            HardwareSpec::new(device, "GPU", "16GB").with_ram_mhz("3200"),
            AnalysisRecord {
                summary: String::new(),
                key_factor: String::new(),
                bottleneck_component: "GPU".into(),
                bottleneck_explanation: String::new(),
                upgrade_suggestion: format!("upgrade {device}"),
                estimated_power_draw: "300W".into(),
                performance_score: score,
                component_breakdown: Vec::new(),
                scenarios: fps
                    .iter()
                    .enumerate()
                    .map(|(i, avg)| FpsScenario {
                        name: format!("Scenario {i}"),
                        resolution: "1920x1080".into(),
                        settings: "Low".into(),
                        avg_fps: avg.to_string(),
                        analysis: String::new(),
                    })
                    .collect(),
            },
        )
    }

    fn scores(entries: &[RankedEntry<'_>]) -> Vec<u32> {
        entries.iter().map(|e| e.result.score()).collect()
    }

    #[test]
    fn rank_is_a_bijection_for_distinct_scores() {
        let results = vec![
            result("A", "G", Some(40), &[]),
            result("B", "G", Some(90), &[]),
            result("C", "G", Some(70), &[]),
            result("D", "G", Some(10), &[]),
        ];
        let ranked = rank(&results);
        let mut ranks: Vec<usize> = ranked.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [3, 1, 2, 4]);
        ranks.sort_unstable();
        assert_eq!(ranks, [1, 2, 3, 4]);
        for a in &ranked {
            for b in &ranked {
                if a.result.score() > b.result.score() {
                    assert!(a.rank < b.rank);
                }
            }
        }
    }

    #[test]
    fn ties_get_consecutive_ranks_in_input_order() {
        let results = vec![
            result("A", "G", Some(50), &[]),
            result("B", "G", Some(80), &[]),
            result("C", "G", Some(50), &[]),
            result("D", "G", None, &[]),
        ];
        let ranks: Vec<usize> = rank(&results).iter().map(|e| e.rank).collect();
        assert_eq!(ranks, [2, 1, 3, 4]);
    }

    #[test]
    fn rank_does_not_reorder_input() {
        let results = vec![
            result("A", "G", Some(10), &[]),
            result("B", "G", Some(90), &[]),
        ];
        let before = results.clone();
        let ranked = rank(&results);
        assert_eq!(results, before);
        assert_eq!(ranked[0].result.id, results[0].id);
    }

    #[test]
    fn top_performers_takes_three_highest() {
        let results = vec![
            result("A", "G", Some(40), &[]),
            result("B", "G", Some(90), &[]),
            result("C", "G", Some(70), &[]),
            result("D", "G", Some(95), &[]),
        ];
        let top = top_performers(&results, TOP_PERFORMERS);
        assert_eq!(
            top.iter().map(|r| r.score()).collect::<Vec<_>>(),
            [95, 90, 70]
        );
        assert_eq!(top_performers(&results[..1], TOP_PERFORMERS).len(), 1);
    }

    #[test]
    fn reselecting_a_key_toggles_direction() {
        let results = vec![
            result("A", "G", Some(40), &[]),
            result("B", "G", Some(90), &[]),
            result("C", "G", Some(70), &[]),
        ];
        let mut state = SortState::new();
        state.select(SortKey::PerformanceScore);
        assert_eq!(state.direction(), SortDirection::Descending);
        assert_eq!(scores(&state.apply(&results)), [90, 70, 40]);

        state.select(SortKey::PerformanceScore);
        assert_eq!(state.direction(), SortDirection::Ascending);
        assert_eq!(scores(&state.apply(&results)), [40, 70, 90]);

        state.select(SortKey::PerformanceScore);
        assert_eq!(state.direction(), SortDirection::Descending);
    }

    #[test]
    fn new_key_starts_descending() {
        let mut state = SortState::new();
        state.select(SortKey::GameName);
        state.select(SortKey::GameName);
        assert_eq!(state.direction(), SortDirection::Ascending);
        state.select(SortKey::Rank);
        assert_eq!(state.key(), SortKey::Rank);
        assert_eq!(state.direction(), SortDirection::Descending);
    }

    #[test]
    fn default_view_is_score_descending() {
        let results = vec![
            result("A", "G", Some(40), &[]),
            result("B", "G", Some(90), &[]),
        ];
        assert_eq!(scores(&SortState::new().apply(&results)), [90, 40]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let results = vec![
            result("Device B", "Zelda", Some(60), &[]),
            result("Device A", "Apex", Some(80), &[]),
            result("Device C", "Zelda", Some(70), &[]),
        ];
        let mut state = SortState::new();
        state.select(SortKey::GameName);
        state.select(SortKey::GameName);
        let devices: Vec<&str> = state
            .apply(&results)
            .iter()
            .map(|e| e.result.device_label())
            .collect();
        assert_eq!(devices, ["Device A", "Device B", "Device C"]);

        state.select(SortKey::GameName);
        let devices: Vec<&str> = state
            .apply(&results)
            .iter()
            .map(|e| e.result.device_label())
            .collect();
        assert_eq!(devices, ["Device B", "Device C", "Device A"]);
    }

    #[test]
    fn rank_survives_resorting() {
        let results = vec![
            result("Device B", "G", Some(60), &[]),
            result("Device A", "G", Some(80), &[]),
        ];
        let mut state = SortState::new();
        state.select(SortKey::DeviceLabel);
        state.select(SortKey::DeviceLabel);
        let entries = state.apply(&results);
        assert_eq!(entries[0].result.device_label(), "Device A");
        assert_eq!(entries[0].rank, 1);
        assert_eq!(entries[1].rank, 2);
    }

    #[test]
    fn primary_fps_reads_first_number() {
        assert_eq!(primary_fps(&result("A", "G", None, &["70-110 FPS", "40 FPS"])), 70);
        assert_eq!(primary_fps(&result("A", "G", None, &["Unplayable"])), 0);
        assert_eq!(primary_fps(&result("A", "G", None, &[])), 0);
        assert_eq!(primary_fps(&result("A", "G", None, &["~ 144fps"])), 144);
    }

    #[test]
    fn sorts_by_primary_fps() {
        let results = vec![
            result("A", "G", Some(1), &["70-110 FPS"]),
            result("B", "G", Some(2), &["N/A"]),
            result("C", "G", Some(3), &["120 FPS"]),
        ];
        let mut state = SortState::new();
        state.select(SortKey::PrimaryScenarioFps);
        let order: Vec<u64> = state.apply(&results).iter().map(|e| primary_fps(e.result)).collect();
        assert_eq!(order, [120, 70, 0]);
    }
}
