//! Slider purpose inference.
//!
//! A best-effort heuristic that guesses what a slider controls from its
//! name and from annotation panels placed near it on the canvas. This is
//! presentation sugar layered on top of the snapshot records - nothing in
//! dispatch or correctness depends on it, and callers should treat the
//! result as a hint.

use super::{PanelRecord, SliderRecord};

/// Canvas distance within which a panel counts as "nearby".
const PANEL_PROXIMITY: f64 = 160.0;

const NAME_HINTS: &[(&str, &str)] = &[
    ("width", "controls a width dimension"),
    ("height", "controls a height dimension"),
    ("depth", "controls a depth dimension"),
    ("length", "controls a length dimension"),
    ("radius", "controls a radius"),
    ("count", "controls an element count"),
    ("num", "controls an element count"),
    ("angle", "controls an angle"),
    ("rotation", "controls an angle"),
    ("scale", "controls a scale factor"),
    ("offset", "controls an offset distance"),
    ("span", "controls a span length"),
    ("division", "controls a subdivision count"),
];

/// Guess a slider's purpose, or `None` when nothing matches.
pub fn infer_slider_purpose(slider: &SliderRecord, panels: &[PanelRecord]) -> Option<String> {
    let lowered = slider.name.to_lowercase();
    for (keyword, purpose) in NAME_HINTS {
        if lowered.contains(keyword) {
            return Some((*purpose).to_string());
        }
    }

    // Fall back to the text of the nearest annotation panel.
    let position = slider.position?;
    panels
        .iter()
        .filter_map(|panel| {
            let panel_pos = panel.position?;
            let dx = panel_pos[0] - position[0];
            let dy = panel_pos[1] - position[1];
            let distance = (dx * dx + dy * dy).sqrt();
            (distance <= PANEL_PROXIMITY).then_some((distance, panel))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, panel)| format!("annotated nearby: {}", panel.text.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider(name: &str, position: Option<[f64; 2]>) -> SliderRecord {
        SliderRecord {
            name: name.into(),
            current_value: 0.0,
            min: 0.0,
            max: 1.0,
            position,
            group: None,
        }
    }

    #[test]
    fn test_name_keyword_wins() {
        let purpose = infer_slider_purpose(&slider("Roof Width", None), &[]);
        assert_eq!(purpose.as_deref(), Some("controls a width dimension"));
    }

    #[test]
    fn test_nearby_panel_text_used_as_fallback() {
        let panels = vec![
            PanelRecord {
                name: "far".into(),
                text: "unrelated".into(),
                position: Some([900.0, 900.0]),
            },
            PanelRecord {
                name: "near".into(),
                text: "beam spacing".into(),
                position: Some([110.0, 40.0]),
            },
        ];
        let purpose = infer_slider_purpose(&slider("S1", Some([100.0, 40.0])), &panels);
        assert_eq!(purpose.as_deref(), Some("annotated nearby: beam spacing"));
    }

    #[test]
    fn test_no_signal_yields_none() {
        assert!(infer_slider_purpose(&slider("S1", None), &[]).is_none());
    }
}
