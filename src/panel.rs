// panel.rs — per-interaction state of the helper panel and its refresh rules.
use crate::blocks::{self, ApplyMode, PreviewSource};
use crate::config::PanelDefaults;
use crate::prompt::{self, BatchMode};
use crate::taxonomy::{self, PoseTriple, REFERENCE_POSE};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section { Builder, Presets, Batch }

#[derive(Clone, Debug)]
pub struct PanelState {
    pub include_trigger: bool,
    pub section:         Section,

    pub builder:         PoseTriple,
    pub builder_out:     String,

    pub preset:          String,
    pub preset_out:      String,
    pub preset_search:   String,

    pub batch_mode:      BatchMode,
    pub batch_base:      PoseTriple,
    pub batch_out:       String,

    pub apply_mode:      ApplyMode,
    blank_lines:         usize,
    pub apply_source:    PreviewSource,
    pub preview:         String,

    /// Host widget the apply action writes to, if one was found.
    pub prompt_target:   Option<String>,
}

impl PanelState {
    pub const MIN_BLANK_LINES: usize = 1;
    pub const MAX_BLANK_LINES: usize = 3;

    pub fn new(defaults: &PanelDefaults, prompt_target: Option<String>) -> Self {
        let mut state = Self {
            include_trigger: defaults.include_trigger,
            section:         Section::Builder,
            builder:         PoseTriple::REFERENCE,
            builder_out:     String::new(),
            preset:          REFERENCE_POSE.to_string(),
            preset_out:      String::new(),
            preset_search:   String::new(),
            batch_mode:      defaults.batch_mode(),
            batch_base:      PoseTriple::REFERENCE,
            batch_out:       String::new(),
            apply_mode:      defaults.apply_mode(),
            blank_lines:     defaults.blank_lines.clamp(Self::MIN_BLANK_LINES, Self::MAX_BLANK_LINES),
            apply_source:    defaults.apply_source(),
            preview:         String::new(),
            prompt_target,
        };
        state.refresh_all();
        state
    }

    pub fn blank_lines(&self) -> usize { self.blank_lines }

    pub fn set_blank_lines(&mut self, n: usize) {
        self.blank_lines = n.clamp(Self::MIN_BLANK_LINES, Self::MAX_BLANK_LINES);
        self.refresh_preview();
    }

    pub fn can_apply(&self) -> bool { self.prompt_target.is_some() }

    // ── Builder ──────────────────────────────────────────────────────────────

    pub fn refresh_builder(&mut self) {
        let b = self.builder;
        self.builder_out = prompt::canonical_from_parts(b.azimuth, b.elevation, b.distance, self.include_trigger);
        self.refresh_preview();
    }

    pub fn set_reference(&mut self) {
        self.builder = PoseTriple::REFERENCE;
        self.builder_out = if self.include_trigger { REFERENCE_POSE.to_string() }
                           else { prompt::strip_trigger(REFERENCE_POSE) };
        self.refresh_preview();
    }

    pub fn clear_builder(&mut self) {
        self.builder_out.clear();
        self.refresh_preview();
    }

    // ── Presets ──────────────────────────────────────────────────────────────

    pub fn refresh_preset(&mut self) {
        let p = self.preset.trim();
        self.preset_out = if p.is_empty()            { String::new() }
                          else if self.include_trigger { p.to_string() }
                          else                         { prompt::strip_trigger(p) };
        self.refresh_preview();
    }

    pub fn select_preset(&mut self, preset: &str) {
        self.preset = preset.to_string();
        self.refresh_preset();
    }

    /// Presets matching `query`, best first. Empty query keeps table order.
    pub fn preset_matches(query: &str) -> Vec<&'static str> {
        let q = query.trim().to_lowercase();
        let mut ranked: Vec<(u8, usize, &'static str)> = taxonomy::all_prompts().iter().enumerate()
            .filter_map(|(i, p)| search_rank(p, &q).map(|r| (r, i, p.as_str())))
            .collect();
        ranked.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
        ranked.into_iter().map(|(_, _, p)| p).collect()
    }

    // ── Batch ────────────────────────────────────────────────────────────────

    pub fn refresh_batch(&mut self) {
        let b = self.batch_base;
        self.batch_out = prompt::build_batch(self.batch_mode, b.azimuth, b.elevation, b.distance, self.include_trigger);
        self.refresh_preview();
    }

    // ── Apply ────────────────────────────────────────────────────────────────

    pub fn refresh_preview(&mut self) {
        self.preview = blocks::preview_text(self.apply_source, &self.builder_out, &self.preset_out,
            &self.batch_out, self.blank_lines);
    }

    /// Trigger flag changed: every output depends on it.
    pub fn refresh_all(&mut self) {
        self.refresh_builder();
        self.refresh_preset();
        self.refresh_batch();
    }

    /// Merged text for the host's prompt box.
    pub fn apply(&self, existing: &str) -> String {
        blocks::apply_to_prompts_box(existing, &self.preview, self.apply_mode, self.blank_lines)
    }
}

fn search_rank(prompt: &str, query: &str) -> Option<u8> {
    if query.is_empty() { return Some(0); }
    let p = prompt.to_lowercase();
    let bare = p.strip_prefix(&taxonomy::TRIGGER.to_lowercase()).map(str::trim_start).unwrap_or(p.as_str());
    if bare.starts_with(query)  { Some(2) }
    else if p.contains(query)   { Some(1) }
    else                        { None }
}
