//! CLI output rendering.
//!
//! Every result is printed either as a human-readable block or, with
//! `--json`, as one JSON object per line.

use std::io::{self, Write};

use anyhow::Result;

use crate::scene::LoadOutcome;
use crate::state::SelectionSnapshot;

/// Print the outcome of a catalog load.
pub fn print_load_outcome(outcome: &LoadOutcome, json_mode: bool) -> Result<()> {
    if json_mode {
        let json = serde_json::json!({ "type": "load", "outcome": outcome });
        println!("{}", json);
    } else {
        match outcome {
            LoadOutcome::Fetched { scene_count } => {
                eprintln!("Loaded {} scene(s)", scene_count);
            }
            LoadOutcome::Fallback { reason } => {
                eprintln!("Catalog unavailable ({}), using built-in scene", reason);
            }
        }
    }
    Ok(())
}

/// Print the current selection.
pub fn print_selection(snapshot: &SelectionSnapshot, json_mode: bool) -> Result<()> {
    if json_mode {
        let json = serde_json::json!({
            "type": "selection",
            "currentSceneId": snapshot.current_scene_id,
            "currentWeatherId": snapshot.current_weather_id,
            "currentTimeId": snapshot.current_time_id,
            "autoMode": snapshot.auto_mode,
            "currentTime": snapshot.current_time,
        });
        println!("{}", json);
    } else {
        print!("{}", format_selection(snapshot));
    }
    io::stdout().flush()?;
    Ok(())
}

/// Print the scene hierarchy, marking the current selection.
pub fn print_scenes(snapshot: &SelectionSnapshot, json_mode: bool) -> Result<()> {
    if json_mode {
        let json = serde_json::json!({ "type": "scenes", "scenes": snapshot.scenes });
        println!("{}", json);
    } else {
        print!("{}", format_scene_tree(snapshot));
    }
    io::stdout().flush()?;
    Ok(())
}

fn or_none(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

/// Human-readable selection block.
pub fn format_selection(snapshot: &SelectionSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&format!("scene:   {}\n", or_none(&snapshot.current_scene_id)));
    out.push_str(&format!("weather: {}\n", or_none(&snapshot.current_weather_id)));
    out.push_str(&format!(
        "time:    {}{}\n",
        or_none(&snapshot.current_time_id),
        if snapshot.auto_mode { " [auto]" } else { "" }
    ));

    match &snapshot.current_time {
        Some(time) => {
            out.push_str(&format!("name:    {}\n", time.name));
            out.push_str(&format!("image:   {}\n", time.image));
            if let Some(audio) = &time.audio {
                out.push_str(&format!("audio:   {}\n", audio));
            }
            let params: Vec<String> = time
                .atmosphere
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            out.push_str(&format!("atmosphere: {}\n", params.join(" ")));
        }
        None => out.push_str("(no time variant selected)\n"),
    }
    out
}

/// Indented Scene → Weather → Time tree; `*` marks the current path.
pub fn format_scene_tree(snapshot: &SelectionSnapshot) -> String {
    fn marker(selected: bool) -> &'static str {
        if selected {
            "*"
        } else {
            " "
        }
    }

    if snapshot.scenes.is_empty() {
        return "(no scenes loaded)\n".to_string();
    }

    let mut out = String::new();
    for scene in &snapshot.scenes {
        let scene_selected = snapshot.current_scene_id.as_deref() == Some(scene.id.as_str());
        out.push_str(&format!(
            "{} {} ({})\n",
            marker(scene_selected),
            scene.id,
            scene.name
        ));

        for weather in &scene.weathers {
            let weather_selected = scene_selected
                && snapshot.current_weather_id.as_deref() == Some(weather.id.as_str());
            out.push_str(&format!(
                "  {} {} ({})\n",
                marker(weather_selected),
                weather.id,
                weather.name
            ));

            for time in &weather.times {
                let time_selected = weather_selected
                    && snapshot.current_time_id.as_deref() == Some(time.id.as_str());
                out.push_str(&format!(
                    "    {} {} ({})\n",
                    marker(time_selected),
                    time.id,
                    time.name
                ));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::SceneCatalog;

    fn default_snapshot() -> SelectionSnapshot {
        let catalog = SceneCatalog::builtin_default();
        let current_time = catalog.scenes[0].weathers[0].times[0].clone();
        SelectionSnapshot {
            scenes: catalog.scenes,
            current_scene_id: Some("scene1".to_string()),
            current_weather_id: Some("sunny".to_string()),
            current_time_id: Some("day".to_string()),
            auto_mode: true,
            current_time: Some(current_time),
        }
    }

    #[test]
    fn formats_selection() {
        let text = format_selection(&default_snapshot());
        assert!(text.contains("scene:   scene1\n"));
        assert!(text.contains("time:    day [auto]\n"));
        assert!(text.contains("image:   day.png\n"));
        assert!(text.contains("atmosphere: brightness=1 contrast=1 saturation=1\n"));
    }

    #[test]
    fn formats_empty_selection() {
        let snapshot = SelectionSnapshot {
            scenes: Vec::new(),
            current_scene_id: None,
            current_weather_id: None,
            current_time_id: None,
            auto_mode: false,
            current_time: None,
        };
        let text = format_selection(&snapshot);
        assert!(text.contains("scene:   -\n"));
        assert!(text.contains("(no time variant selected)"));
        assert_eq!(format_scene_tree(&snapshot), "(no scenes loaded)\n");
    }

    #[test]
    fn tree_marks_current_path() {
        let text = format_scene_tree(&default_snapshot());
        assert_eq!(
            text,
            "* scene1 (场景 1)\n  * sunny (晴天)\n    * day (白天)\n"
        );
    }
}
