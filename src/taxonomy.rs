// taxonomy.rs — fixed camera-pose vocabulary. Labels double as prompt tokens.
use std::sync::OnceLock;

pub const TRIGGER: &str = "<sks>";

pub const AZIMUTH: [&str; 8] = [
    "front view (0°)",
    "front-right quarter view (45°)",
    "right side view (90°)",
    "back-right quarter view (135°)",
    "back view (180°)",
    "back-left quarter view (225°)",
    "left side view (270°)",
    "front-left quarter view (315°)",
];

pub const ELEVATION: [&str; 4] = [
    "low-angle shot (-30°)",
    "eye-level shot (0°)",
    "elevated shot (30°)",
    "high-angle shot (60°)",
];

pub const DISTANCE: [&str; 3] = [
    "close-up (×0.6)",
    "medium shot (×1.0)",
    "wide shot (×1.8)",
];

/// Reference pose: front view, eye level, medium shot.
pub const REFERENCE_POSE: &str = "<sks> front view (0°) eye-level shot (0°) medium shot (×1.0)";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PoseTriple {
    pub azimuth:   &'static str,
    pub elevation: &'static str,
    pub distance:  &'static str,
}

impl PoseTriple {
    pub const REFERENCE: PoseTriple = PoseTriple {
        azimuth: AZIMUTH[0], elevation: ELEVATION[1], distance: DISTANCE[1],
    };

    /// Canonical prompt with the trigger token in front.
    pub fn render(&self) -> String {
        format!("{TRIGGER} {} {} {}", self.azimuth, self.elevation, self.distance)
    }
}

// ── Canonical table ───────────────────────────────────────────────────────────

pub struct CanonicalTable {
    ordered: Vec<String>,
}

impl CanonicalTable {
    /// Distance outermost, azimuth innermost.
    pub fn build() -> Self {
        let mut ordered = Vec::with_capacity(AZIMUTH.len() * ELEVATION.len() * DISTANCE.len());
        for distance in DISTANCE {
            for elevation in ELEVATION {
                for azimuth in AZIMUTH {
                    ordered.push(PoseTriple { azimuth, elevation, distance }.render());
                }
            }
        }
        Self { ordered }
    }

    pub fn all(&self) -> &[String] { &self.ordered }

    /// Exact-match lookup; the index mirrors the nesting order of `build`.
    pub fn get(&self, azimuth: &str, elevation: &str, distance: &str) -> Option<&str> {
        let a = AZIMUTH.iter().position(|l| *l == azimuth)?;
        let e = ELEVATION.iter().position(|l| *l == elevation)?;
        let d = DISTANCE.iter().position(|l| *l == distance)?;
        let idx = (d * ELEVATION.len() + e) * AZIMUTH.len() + a;
        self.ordered.get(idx).map(String::as_str)
    }
}

static TABLE: OnceLock<CanonicalTable> = OnceLock::new();

pub fn table() -> &'static CanonicalTable {
    TABLE.get_or_init(CanonicalTable::build)
}

/// All 96 canonical prompts, trigger included.
pub fn all_prompts() -> &'static [String] { table().all() }
