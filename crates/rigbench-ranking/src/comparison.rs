use rigbench_types::{saved::SavedResult, RigbenchError, Result};

pub const MIN_COMPARISON_RESULTS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRow {
    pub metric: String,
    pub values: Vec<String>,
}

/// Side-by-side grid: one column per saved result, one row per metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn build(results: &[&SavedResult]) -> Result<Self> {
        if results.len() < MIN_COMPARISON_RESULTS {
            return Err(RigbenchError::Validation(format!(
                "Select at least {MIN_COMPARISON_RESULTS} saved analyses to compare."
            )));
        }

        let mut headers = vec!["Metric".to_string()];
        headers.extend(results.iter().map(|r| {
            let short = r.device_label().split(' ').next().unwrap_or_default();
            format!("{} on {}", r.game_name, short)
        }));

        let mut rows = vec![
            metric_row("CPU", results, |r| r.device_specs.cpu.clone()),
            metric_row("GPU", results, |r| r.device_specs.gpu.clone()),
            metric_row("RAM", results, |r| match r.device_specs.known_ram_mhz() {
                Some(mhz) => format!("{} ({mhz} MHz)", r.device_specs.ram),
                None => r.device_specs.ram.clone(),
            }),
            metric_row("Primary Bottleneck", results, |r| {
                r.analysis.bottleneck_component.clone()
            }),
            metric_row("Upgrade Suggestion", results, |r| {
                r.analysis.upgrade_suggestion.clone()
            }),
            metric_row("Estimated Power Draw", results, |r| {
                r.analysis.estimated_power_draw.clone()
            }),
        ];

        // Scenario rows follow the first result's scenario list.
        for (index, scenario) in results[0].analysis.scenarios.iter().enumerate() {
            rows.push(metric_row(format!("FPS ({})", scenario.name), results, |r| {
                r.analysis
                    .scenarios
                    .get(index)
                    .map(|s| s.avg_fps.clone())
                    .unwrap_or_else(|| "N/A".to_string())
            }));
        }

        Ok(Self { headers, rows })
    }
}

fn metric_row<F>(
    metric: impl Into<String>,
    results: &[&SavedResult],
    value: F,
) -> ComparisonRow
where
    F: Fn(&SavedResult) -> String,
{
    ComparisonRow {
        metric: metric.into(),
        values: results.iter().map(|r| value(r)).collect(),
    }
}

/// Picks saved results by id, keeping stored order.
pub fn select_by_ids<'a>(
    saved: &'a [SavedResult],
    ids: &[String],
) -> Result<Vec<&'a SavedResult>> {
    if let Some(missing) = ids.iter().find(|id| !saved.iter().any(|r| &r.id == *id)) {
        return Err(RigbenchError::NotFound(missing.clone()));
    }
    Ok(saved.iter().filter(|r| ids.contains(&r.id)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::result;

    #[test]
    fn needs_two_results() {
        let only = result("Pixel 8", "G", Some(10), &[]);
        assert!(matches!(
            ComparisonTable::build(&[&only]),
            Err(RigbenchError::Validation(_))
        ));
    }

    #[test]
    fn builds_metric_rows() {
        let mut a = result(
            "Galaxy S23 Ultra",
            "Genshin Impact",
            Some(80),
            &["60 FPS", "45 FPS"],
        );
        a.device_specs.ram_mhz = Some("N/A".into());
        let b = result("Pixel 8", "Genshin Impact", Some(60), &["50 FPS"]);
        let table = ComparisonTable::build(&[&a, &b]).expect("table");

        assert_eq!(
            table.headers,
            ["Metric", "Genshin Impact on Galaxy", "Genshin Impact on Pixel"]
        );
        let ram = table.rows.iter().find(|r| r.metric == "RAM").expect("ram row");
        assert_eq!(ram.values, ["16GB", "16GB (3200 MHz)"]);

        let fps_rows: Vec<&ComparisonRow> = table
            .rows
            .iter()
            .filter(|r| r.metric.starts_with("FPS"))
            .collect();
        assert_eq!(fps_rows.len(), 2);
        assert_eq!(fps_rows[0].metric, "FPS (Scenario 0)");
        assert_eq!(fps_rows[1].values, ["45 FPS", "N/A"]);
    }

    #[test]
    fn selection_keeps_stored_order_and_reports_unknown_ids() {
        let saved = vec![
            result("A", "G", Some(1), &[]),
            result("B", "G", Some(2), &[]),
            result("C", "G", Some(3), &[]),
        ];
        let picked = select_by_ids(&saved, &[saved[2].id.clone(), saved[0].id.clone()])
            .expect("select");
        assert_eq!(
            picked.iter().map(|r| r.device_label()).collect::<Vec<_>>(),
            ["A", "C"]
        );
        assert!(matches!(
            select_by_ids(&saved, &["missing".to_string()]),
            Err(RigbenchError::NotFound(_))
        ));
    }
}
