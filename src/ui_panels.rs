// ui_panels.rs
use egui::{Ui, CollapsingHeader, ComboBox, Grid, Slider, ScrollArea, RichText};
use crate::blocks::{ApplyMode, PreviewSource};
use crate::host::PLUGIN_NAME;
use crate::panel::{PanelState, Section};
use crate::prompt::BatchMode;
use crate::taxonomy::{PoseTriple, AZIMUTH, DISTANCE, ELEVATION, REFERENCE_POSE, TRIGGER};

/// Panel state plus the bits of widget state egui needs between frames.
pub struct PanelView {
    pub state:  PanelState,
    popup_open: bool,
}

impl PanelView {
    pub fn new(state: PanelState) -> Self { Self { state, popup_open: false } }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PanelAction {
    Apply,
    Copy(String),
}

pub fn render_panel(ui: &mut Ui, id_salt: &str, view: &mut PanelView) -> Option<PanelAction> {
    ui.push_id(id_salt, |ui| {
        CollapsingHeader::new(RichText::new(PLUGIN_NAME).strong())
            .default_open(false)
            .show(ui, |ui| { ui.add_space(4.0); let a = render_body(ui, view); ui.add_space(4.0); a })
            .body_returned.flatten()
    }).inner
}

fn render_body(ui: &mut Ui, view: &mut PanelView) -> Option<PanelAction> {
    ui.label("Outputs angle/elevation/distance with degrees and factors included.");
    ui.horizontal(|ui| {
        ui.label("Reference pose:");
        ui.label(RichText::new(REFERENCE_POSE).monospace());
    });
    ui.add_space(4.0);

    let state = &mut view.state;
    if ui.checkbox(&mut state.include_trigger, format!("Include {TRIGGER} trigger token")).changed() {
        state.refresh_all();
    }
    ui.add_space(4.0);

    ui.horizontal(|ui| {
        ui.selectable_value(&mut state.section, Section::Builder, "Builder");
        ui.selectable_value(&mut state.section, Section::Presets, "Presets (96)");
        ui.selectable_value(&mut state.section, Section::Batch, "Batch");
    });
    ui.separator();

    let section = state.section;
    let mut action = match section {
        Section::Builder => render_builder(ui, state),
        Section::Presets => render_presets(ui, view),
        Section::Batch   => render_batch(ui, &mut view.state),
    };
    ui.separator();
    action = render_apply(ui, &mut view.state).or(action);
    action
}

// ── Tabs ──────────────────────────────────────────────────────────────────────

fn render_pose_grid(ui: &mut Ui, id: &str, triple: &mut PoseTriple, suffix: &str) -> bool {
    Grid::new(id).num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
        let mut changed = false;
        for (label, current, choices) in [
            ("Azimuth",   &mut triple.azimuth,   &AZIMUTH[..]),
            ("Elevation", &mut triple.elevation, &ELEVATION[..]),
            ("Distance",  &mut triple.distance,  &DISTANCE[..]),
        ] {
            ui.label(format!("{label}{suffix}:"));
            changed |= render_dropdown(ui, &format!("{id}_{label}"), current, choices);
            ui.end_row();
        }
        changed
    }).inner
}

fn render_dropdown(ui: &mut Ui, id: &str, current: &mut &'static str, choices: &[&'static str]) -> bool {
    ComboBox::from_id_salt(id).selected_text(*current).width(260.0).show_ui(ui, |ui| {
        choices.iter().fold(false, |ch, opt| ch | ui.selectable_value(current, *opt, *opt).changed())
    }).inner.unwrap_or(false)
}

fn output_box(ui: &mut Ui, id: &str, text: &str, rows: usize) -> bool {
    let mut copy = false;
    ScrollArea::vertical().id_salt(id).max_height(rows as f32 * 16.0).show(ui, |ui| {
        ui.add(egui::TextEdit::multiline(&mut &*text)
            .desired_width(f32::INFINITY).desired_rows(rows).font(egui::TextStyle::Monospace));
    });
    if ui.small_button("📋 Copy").clicked() { copy = true; }
    copy
}

fn render_builder(ui: &mut Ui, state: &mut PanelState) -> Option<PanelAction> {
    if render_pose_grid(ui, "builder", &mut state.builder, "") {
        state.refresh_builder();
    }
    ui.label("Builder output");
    let copy = output_box(ui, "builder_out", &state.builder_out, 4);
    ui.horizontal(|ui| {
        if ui.button("Set reference pose").clicked() { state.set_reference(); }
        if ui.button("Clear").clicked() { state.clear_builder(); }
    });
    copy.then(|| PanelAction::Copy(state.builder_out.clone()))
}

fn render_presets(ui: &mut Ui, view: &mut PanelView) -> Option<PanelAction> {
    ui.label("Pick a preset (type to search)");
    let popup_id = ui.make_persistent_id("preset_popup");
    let mut popup_open = view.popup_open;

    let btn = ui.horizontal(|ui| {
        let b = ui.button("🔽");
        let search = &mut view.state.preset_search;
        let sr = ui.add(egui::TextEdit::singleline(search)
            .hint_text(view.state.preset.as_str())
            .desired_width(ui.available_width() - 30.0));
        if sr.changed() && !search.is_empty() { popup_open = true; }
        if ui.button("✖").clicked() {
            view.state.preset_search.clear();
            popup_open = false;
        }
        b
    }).inner;
    if btn.clicked() { popup_open = !popup_open; }

    let matches = PanelState::preset_matches(&view.state.preset_search);
    let mut picked: Option<&'static str> = None;

    egui::Popup::new(popup_id, ui.ctx().clone(), egui::PopupAnchor::from(&btn), ui.layer_id())
        .open_memory(Some(egui::SetOpenCommand::Bool(popup_open)))
        .close_behavior(egui::PopupCloseBehavior::CloseOnClickOutside)
        .show(|ui| {
            ui.set_min_width(420.0);
            ScrollArea::vertical().max_height(340.0).auto_shrink([false, false]).show(ui, |ui| {
                if matches.is_empty() { ui.weak("No preset matches."); }
                for p in &matches {
                    if ui.selectable_label(view.state.preset == *p, *p).clicked() { picked = Some(*p); }
                }
            });
        })
        .map(|r| if r.response.should_close() || picked.is_some() {
            egui::Popup::close_id(ui.ctx(), popup_id);
            popup_open = false;
        })
        .unwrap_or_else(|| popup_open = false);

    if let Some(p) = picked {
        view.state.preset_search.clear();
        view.state.select_preset(p);
    }
    view.popup_open = popup_open;

    ui.label("Preset output");
    output_box(ui, "preset_out", &view.state.preset_out, 4)
        .then(|| PanelAction::Copy(view.state.preset_out.clone()))
}

fn render_batch(ui: &mut Ui, state: &mut PanelState) -> Option<PanelAction> {
    ui.label("Batch mode");
    let mut changed = false;
    for mode in BatchMode::ALL {
        changed |= ui.radio_value(&mut state.batch_mode, mode, mode.label()).changed();
    }
    ui.add_space(4.0);
    changed |= render_pose_grid(ui, "batch", &mut state.batch_base, " base");
    if changed | ui.button("Generate now").clicked() {
        state.refresh_batch();
    }
    ui.label(format!("Batch output ({} lines)", state.batch_out.lines().count()));
    output_box(ui, "batch_out", &state.batch_out, 8)
        .then(|| PanelAction::Copy(state.batch_out.clone()))
}

// ── Apply ─────────────────────────────────────────────────────────────────────

fn render_apply(ui: &mut Ui, state: &mut PanelState) -> Option<PanelAction> {
    ui.label(RichText::new("Apply to main Prompts box").strong());
    let mut changed = false;
    Grid::new("apply_grid").num_columns(2).spacing([8.0, 4.0]).show(ui, |ui| {
        ui.label("Apply mode:");
        ui.horizontal(|ui| for m in ApplyMode::ALL {
            ui.radio_value(&mut state.apply_mode, m, m.label());
        });
        ui.end_row();

        ui.label("Blank lines between prompts:");
        let mut n = state.blank_lines();
        if ui.add(Slider::new(&mut n, PanelState::MIN_BLANK_LINES..=PanelState::MAX_BLANK_LINES).step_by(1.0)).changed() {
            state.set_blank_lines(n);
        }
        ui.end_row();

        ui.label("Apply which output?");
        ui.horizontal(|ui| for s in PreviewSource::ALL {
            changed |= ui.radio_value(&mut state.apply_source, s, s.label()).changed();
        });
        ui.end_row();
    });
    if changed { state.refresh_preview(); }

    ui.label("Preview (this is what will be inserted)");
    let mut action = output_box(ui, "preview", &state.preview, 6).then(|| PanelAction::Copy(state.preview.clone()));

    if state.can_apply() {
        if ui.button("Apply to Prompts box").clicked() { action = Some(PanelAction::Apply); }
    } else {
        ui.label(RichText::new("Prompts box not found. Copy from Preview and paste manually.")
            .color(ui.visuals().warn_fg_color));
    }
    action
}
