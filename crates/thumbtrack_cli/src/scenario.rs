//! Scenario definition for headless scroll bar simulations.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use thumbtrack_bar::ScrollLayout;
use thumbtrack_core::EdgeInsets;

/// Sequence of simulation steps, run against one scroll bar.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    /// Layout before the first step
    #[serde(default)]
    pub layout: Option<ScrollLayout>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("invalid scenario")
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw)
    }
}

/// One input to the simulated scroll bar.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// Replace the layout
    Layout(ScrollLayout),
    /// Grab the thumb (if not held) and move it by `translation` from where it was grabbed
    Drag { translation: f64 },
    /// Let go of the thumb
    Release { velocity: f64 },
    /// The content scrolled on its own
    Observe { offset: f64 },
    /// Change content and/or safe-area insets
    Insets {
        #[serde(default)]
        content: Option<EdgeInsets>,
        #[serde(default)]
        safe_area: Option<EdgeInsets>,
    },
    /// A gesture started on the content area
    ContentGesture,
    /// Let frames run
    Wait { ms: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_steps() {
        let scenario = Scenario::from_json(
            r#"{
                "layout": {
                    "content_size": { "width": 300, "height": 1300 },
                    "viewport_size": { "width": 300, "height": 300 }
                },
                "steps": [
                    { "type": "observe", "offset": 500 },
                    { "type": "drag", "translation": 12.5 },
                    { "type": "release", "velocity": 800 },
                    { "type": "insets", "content": { "top": 40 } },
                    { "type": "content_gesture" },
                    { "type": "wait", "ms": 1500 }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(scenario.layout.unwrap().viewport_size.height, 300.0);
        assert_eq!(scenario.steps.len(), 6);
        assert!(matches!(scenario.steps[1], ScenarioStep::Drag { translation } if translation == 12.5));
        match &scenario.steps[3] {
            ScenarioStep::Insets { content, safe_area } => {
                assert_eq!(content.unwrap().top, 40.0);
                assert!(safe_area.is_none());
            }
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_layout_step_is_flattened() {
        let scenario = Scenario::from_json(
            r#"{ "steps": [ { "type": "layout", "viewport_size": { "width": 10, "height": 20 } } ] }"#,
        )
        .unwrap();
        assert!(scenario.layout.is_none());
        match &scenario.steps[0] {
            ScenarioStep::Layout(layout) => assert_eq!(layout.viewport_size.height, 20.0),
            other => panic!("unexpected step {other:?}"),
        }
    }

    #[test]
    fn test_unknown_step_rejected() {
        assert!(Scenario::from_json(r#"{ "steps": [ { "type": "teleport" } ] }"#).is_err());
    }
}
