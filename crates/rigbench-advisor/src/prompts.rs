use std::collections::BTreeMap;

use rigbench_types::hardware::HardwareSpec;

pub(crate) fn device_specs(device: &str, language: &str) -> String {
    format!(
        r#"You are a hardware specification expert. Identify the device named "{device}" and report its official specifications.
- For phones and tablets, name the SoC's CPU and GPU models.
- For RAM, report the base configuration amount and its speed in MHz (e.g. "3200"), or "N/A" when speed is not meaningful.
- If the device cannot be identified or the name is too generic, do not guess.
- Write every text value in this language: "{language}".
Answer strictly with the provided JSON schema."#
    )
}

pub(crate) fn fps_analysis(spec: &HardwareSpec, game: &str, language: &str) -> String {
    let ram_speed = spec
        .known_ram_mhz()
        .map(|mhz| format!("{mhz} MHz"))
        .unwrap_or_else(|| "Speed not specified".to_string());
    let virtual_ram = spec.virtual_ram.as_deref().unwrap_or("N/A");
    format!(
        r#"Estimate gaming performance of the PC below in "{game}".
Write every text value in this language: "{language}".

Hardware:
- CPU: {cpu}
- GPU: {gpu}
- RAM: {ram} ({ram_speed})
- Virtual RAM (page file): {virtual_ram}

Work through these steps:
1. Characterize "{game}": is it CPU-bound, GPU-bound or memory hungry?
2. Compare the hardware with those needs, including RAM speed and how physical and virtual RAM interact.
3. Name the primary bottleneck among CPU, GPU and RAM, or "Balanced" when none dominates, and explain it briefly.
4. Suggest the single upgrade with the largest gain for this game.
5. Estimate total system power draw under gaming load as a watt range (e.g. "350-450W").
6. Give an integer performance score from 1 to 100 (50 = playable at medium settings, 90+ = high refresh rate).
7. Describe at least two scenarios (e.g. "1080p Low", "1080p High") with average FPS ranges.

Include a Virtual RAM entry in componentBreakdown. Answer strictly with the provided JSON schema."#,
        cpu = spec.cpu,
        gpu = spec.gpu,
        ram = spec.ram,
    )
}

pub(crate) fn translation(base: &BTreeMap<String, String>, target_language: &str) -> String {
    let table = serde_json::to_string_pretty(base).unwrap_or_else(|_| "{}".to_string());
    format!(
        r#"Translate the values of this JSON object into "{target_language}".
- Keep exactly the same keys; do not add, remove or rename any.
- Translate only the string values.

{table}"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn analysis_prompt_mentions_hardware_and_defaults() {
        let spec = HardwareSpec::new("Ryzen 5 5600", "RTX 3060", "16GB");
        let prompt = fps_analysis(&spec, "Cyberpunk 2077", "en");
        assert!(prompt.contains("Ryzen 5 5600"));
        assert!(prompt.contains("Speed not specified"));
        assert!(prompt.contains("Virtual RAM (page file): N/A"));
    }

    #[test]
    fn translation_prompt_embeds_table() {
        let mut base = BTreeMap::new();
        base.insert("title".to_string(), "FPS Estimator".to_string());
        let prompt = translation(&base, "Deutsch");
        assert!(prompt.contains("\"title\": \"FPS Estimator\""));
        assert!(prompt.contains("Deutsch"));
    }
}
