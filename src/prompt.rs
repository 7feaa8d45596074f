// prompt.rs — canonical prompt formatting and batch expansion.
use crate::taxonomy::{self, AZIMUTH, DISTANCE, ELEVATION, TRIGGER};

/// Drops a leading trigger token (and the space after it). Output is trimmed.
pub fn strip_trigger(s: &str) -> String {
    let s = s.trim();
    if s == TRIGGER { return String::new(); }
    match s.strip_prefix(TRIGGER).and_then(|rest| rest.strip_prefix(' ')) {
        Some(rest) => rest.trim_start().to_string(),
        None       => s.to_string(),
    }
}

/// Formats one pose triple. Unknown labels fall back to the same
/// `trigger az el dist` shape, so this never fails.
pub fn canonical_from_parts(azimuth: &str, elevation: &str, distance: &str, include_trigger: bool) -> String {
    let (az, el, dist) = (azimuth.trim(), elevation.trim(), distance.trim());
    let canonical = match taxonomy::table().get(az, el, dist) {
        Some(hit) => hit.to_string(),
        None      => format!("{TRIGGER} {az} {el} {dist}").trim().to_string(),
    };
    if include_trigger { canonical } else { strip_trigger(&canonical) }
}

// ── Batch modes ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BatchMode {
    #[default]
    Single,
    AzimuthSweep,
    ElevationSweep,
    DistanceSweep,
    AllCombinations,
}

impl BatchMode {
    pub const ALL: [BatchMode; 5] = [
        BatchMode::Single, BatchMode::AzimuthSweep, BatchMode::ElevationSweep,
        BatchMode::DistanceSweep, BatchMode::AllCombinations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BatchMode::Single          => "Single",
            BatchMode::AzimuthSweep    => "8-view sweep (same elevation + distance)",
            BatchMode::ElevationSweep  => "4-elevation sweep (same azimuth + distance)",
            BatchMode::DistanceSweep   => "3-distance sweep (same azimuth + elevation)",
            BatchMode::AllCombinations => "All 96 prompts",
        }
    }

    /// Unknown or empty labels map to `Single`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL.into_iter().find(|m| m.label() == label).unwrap_or_default()
    }

    pub fn line_count(self) -> usize {
        match self {
            BatchMode::Single          => 1,
            BatchMode::AzimuthSweep    => AZIMUTH.len(),
            BatchMode::ElevationSweep  => ELEVATION.len(),
            BatchMode::DistanceSweep   => DISTANCE.len(),
            BatchMode::AllCombinations => taxonomy::all_prompts().len(),
        }
    }
}

/// Expands the base triple according to `mode`, one prompt per line.
pub fn build_batch(mode: BatchMode, az: &str, el: &str, dist: &str, include_trigger: bool) -> String {
    let lines: Vec<String> = match mode {
        BatchMode::Single => return canonical_from_parts(az, el, dist, include_trigger),
        BatchMode::AzimuthSweep   => AZIMUTH.iter().map(|a| canonical_from_parts(a, el, dist, include_trigger)).collect(),
        BatchMode::ElevationSweep => ELEVATION.iter().map(|e| canonical_from_parts(az, e, dist, include_trigger)).collect(),
        BatchMode::DistanceSweep  => DISTANCE.iter().map(|d| canonical_from_parts(az, el, d, include_trigger)).collect(),
        BatchMode::AllCombinations => {
            let all = taxonomy::all_prompts();
            if include_trigger { return all.join("\n"); }
            all.iter().map(|p| strip_trigger(p)).collect()
        }
    };
    lines.join("\n")
}

pub fn build_batch_from_label(mode: &str, az: &str, el: &str, dist: &str, include_trigger: bool) -> String {
    build_batch(BatchMode::from_label(mode), az, el, dist, include_trigger)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::REFERENCE_POSE;
    use pretty_assertions::assert_eq;

    #[test]
    fn every_known_triple_formats_canonically() {
        for a in AZIMUTH { for e in ELEVATION { for d in DISTANCE {
            assert_eq!(canonical_from_parts(a, e, d, true), format!("{TRIGGER} {a} {e} {d}"));
            assert_eq!(canonical_from_parts(a, e, d, false), format!("{a} {e} {d}"));
        }}}
    }

    #[test]
    fn reference_pose_with_and_without_trigger() {
        let (a, e, d) = ("front view (0°)", "eye-level shot (0°)", "medium shot (×1.0)");
        assert_eq!(canonical_from_parts(a, e, d, true), REFERENCE_POSE);
        assert_eq!(canonical_from_parts(a, e, d, false), "front view (0°) eye-level shot (0°) medium shot (×1.0)");
    }

    #[test]
    fn labels_are_trimmed_before_lookup() {
        assert_eq!(
            canonical_from_parts("  front view (0°) ", "eye-level shot (0°)\n", " medium shot (×1.0)", true),
            REFERENCE_POSE,
        );
    }

    #[test]
    fn unknown_labels_fall_back_to_same_shape() {
        assert_eq!(canonical_from_parts("tilted", "eye-level shot (0°)", "far", true), "<sks> tilted eye-level shot (0°) far");
        assert_eq!(canonical_from_parts("tilted", "eye-level shot (0°)", "far", false), "tilted eye-level shot (0°) far");
    }

    #[test]
    fn empty_labels_give_trigger_or_nothing() {
        assert_eq!(canonical_from_parts("", "", "", true), TRIGGER);
        assert_eq!(canonical_from_parts("", "", "", false), "");
        assert_eq!(canonical_from_parts("", "x", "y", false), "x y");
    }

    #[test]
    fn strip_trigger_only_touches_prefix() {
        assert_eq!(strip_trigger("<sks> a b"), "a b");
        assert_eq!(strip_trigger("<sks>"), "");
        assert_eq!(strip_trigger("a <sks> b"), "a <sks> b");
        assert_eq!(strip_trigger("<sks>abc"), "<sks>abc");
    }

    #[test]
    fn sweeps_vary_one_dimension() {
        let (a, e, d) = (AZIMUTH[2], ELEVATION[3], DISTANCE[0]);

        let az = build_batch(BatchMode::AzimuthSweep, a, e, d, true);
        let lines: Vec<_> = az.lines().collect();
        assert_eq!(lines.len(), 8);
        for (line, a) in lines.iter().zip(AZIMUTH) {
            assert_eq!(*line, format!("{TRIGGER} {a} {e} {d}"));
        }

        let el = build_batch(BatchMode::ElevationSweep, a, e, d, false);
        let lines: Vec<_> = el.lines().collect();
        assert_eq!(lines.len(), 4);
        for (line, e) in lines.iter().zip(ELEVATION) {
            assert_eq!(*line, format!("{a} {e} {d}"));
        }

        let di = build_batch(BatchMode::DistanceSweep, a, e, d, true);
        assert_eq!(di.lines().count(), 3);
        assert!(di.lines().all(|l| l.contains(a) && l.contains(e)));
    }

    #[test]
    fn all_combinations_ignores_base_and_follows_table() {
        let out = build_batch(BatchMode::AllCombinations, "anything", "", "x", true);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 96);
        let mut i = 0;
        for d in DISTANCE { for e in ELEVATION { for a in AZIMUTH {
            assert_eq!(lines[i], format!("{TRIGGER} {a} {e} {d}"));
            i += 1;
        }}}

        let bare = build_batch(BatchMode::AllCombinations, "", "", "", false);
        assert_eq!(bare.lines().count(), 96);
        assert!(bare.lines().all(|l| !l.starts_with(TRIGGER)));
    }

    #[test]
    fn line_counts_match_mode() {
        for mode in BatchMode::ALL {
            let out = build_batch(mode, AZIMUTH[0], ELEVATION[1], DISTANCE[1], true);
            assert_eq!(out.lines().count(), mode.line_count(), "{mode:?}");
        }
    }

    #[test]
    fn unknown_mode_label_is_single() {
        assert_eq!(BatchMode::from_label("zigzag"), BatchMode::Single);
        assert_eq!(BatchMode::from_label(""), BatchMode::Single);
        assert_eq!(BatchMode::from_label(" All 96 prompts "), BatchMode::AllCombinations);
        assert_eq!(
            build_batch_from_label("???", AZIMUTH[0], ELEVATION[1], DISTANCE[1], true),
            REFERENCE_POSE,
        );
    }
}
