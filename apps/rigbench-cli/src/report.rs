use std::fmt::Write;

use rigbench_ranking::{
    primary_fps, top_performers, ComparisonTable, SortKey, SortState, TOP_PERFORMERS,
};
use rigbench_types::{
    analysis::AnalysisRecord, hardware::HardwareSpec, matrix::MatrixOutcome, saved::SavedResult,
};

pub fn spec(spec: &HardwareSpec) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "CPU:  {}", spec.cpu);
    let _ = writeln!(out, "GPU:  {}", spec.gpu);
    match spec.known_ram_mhz() {
        Some(mhz) => {
            let _ = writeln!(out, "RAM:  {} ({mhz} MHz)", spec.ram);
        }
        None => {
            let _ = writeln!(out, "RAM:  {}", spec.ram);
        }
    }
    if let Some(virtual_ram) = &spec.virtual_ram {
        let _ = writeln!(out, "VRAM: {virtual_ram} (virtual)");
    }
    out
}

pub fn analysis(spec: &HardwareSpec, game: &str, record: &AnalysisRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{game} on {} / {}", spec.cpu, spec.gpu);
    let _ = writeln!(out, "Score: {}/100", record.score());
    let _ = writeln!(out, "{}", record.summary);
    let _ = writeln!(out, "Key factor: {}", record.key_factor);
    let _ = writeln!(
        out,
        "Bottleneck: {} ({})",
        record.bottleneck_component, record.bottleneck_explanation
    );
    let _ = writeln!(out, "Upgrade: {}", record.upgrade_suggestion);
    let _ = writeln!(out, "Power draw: {}", record.estimated_power_draw);

    if !record.component_breakdown.is_empty() {
        let rows: Vec<Vec<String>> = record
            .component_breakdown
            .iter()
            .map(|c| {
                vec![
                    c.component.label().to_string(),
                    c.model.clone(),
                    c.analysis.clone(),
                ]
            })
            .collect();
        let headers = ["Component", "Model", "Analysis"].map(String::from);
        out.push('\n');
        out.push_str(&table(&headers, &rows));
    }
    if !record.scenarios.is_empty() {
        let rows: Vec<Vec<String>> = record
            .scenarios
            .iter()
            .map(|s| {
                vec![
                    s.name.clone(),
                    s.resolution.clone(),
                    s.settings.clone(),
                    s.avg_fps.clone(),
                ]
            })
            .collect();
        let headers = ["Scenario", "Resolution", "Settings", "Avg FPS"].map(String::from);
        out.push('\n');
        out.push_str(&table(&headers, &rows));
    }
    out
}

pub fn saved_list(results: &[SavedResult]) -> String {
    if results.is_empty() {
        return "No saved analyses yet.\n".to_string();
    }
    let rows: Vec<Vec<String>> = results
        .iter()
        .map(|r| {
            vec![
                r.id.clone(),
                r.saved_at.format("%Y-%m-%d %H:%M").to_string(),
                r.game_name.clone(),
                r.device_label().to_string(),
                r.score().to_string(),
            ]
        })
        .collect();
    let headers = ["Id", "Saved", "Game", "Device", "Score"].map(String::from);
    table(&headers, &rows)
}

/// Top performers, the ranked table in `sort` order, then the error log.
pub fn matrix(outcome: &MatrixOutcome, sort: &SortState) -> String {
    let mut out = String::new();
    if outcome.is_total_failure() {
        let _ = writeln!(
            out,
            "All analyses failed. Check the device and game names and try again."
        );
    } else {
        let _ = writeln!(out, "Top performers");
        for (place, result) in top_performers(&outcome.results, TOP_PERFORMERS)
            .iter()
            .enumerate()
        {
            let _ = writeln!(
                out,
                "  {}. {} on {} ({})",
                place + 1,
                result.game_name,
                result.device_label(),
                result.score()
            );
        }
        out.push('\n');

        let headers: Vec<String> = SortKey::ALL
            .iter()
            .map(|key| {
                if *key == sort.key() {
                    format!("{} {}", key.label(), sort.direction().arrow())
                } else {
                    key.label().to_string()
                }
            })
            .collect();
        let rows: Vec<Vec<String>> = sort
            .apply(&outcome.results)
            .iter()
            .map(|entry| {
                let fps = match primary_fps(entry.result) {
                    0 => "-".to_string(),
                    fps => fps.to_string(),
                };
                vec![
                    format!("#{}", entry.rank),
                    entry.result.game_name.clone(),
                    entry.result.device_label().to_string(),
                    entry.result.score().to_string(),
                    fps,
                ]
            })
            .collect();
        out.push_str(&table(&headers, &rows));
    }

    if outcome.has_errors() {
        let _ = writeln!(out, "\nErrors ({})", outcome.errors.len());
        for error in &outcome.errors {
            let _ = writeln!(out, "  - {error}");
        }
    }
    out
}

pub fn comparison(grid: &ComparisonTable) -> String {
    let rows: Vec<Vec<String>> = grid
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.metric.clone()];
            cells.extend(row.values.iter().cloned());
            cells
        })
        .collect();
    table(&grid.headers, &rows)
}

fn table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_row(&mut out, headers, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
