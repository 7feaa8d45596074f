// app.rs — a small stand-in generator UI that hosts the helper panel.
use egui::{Context, CentralPanel, TopBottomPanel, ScrollArea, RichText};
use tracing::{debug, warn};

use crate::config;
use crate::host::{HostError, Injection, MultiAnglePlugin, UiHost, PLUGIN_DESCRIPTION, PLUGIN_NAME, PLUGIN_VERSION};
use crate::panel::PanelState;
use crate::ui_panels::{render_panel, PanelAction, PanelView};

pub enum WidgetKind {
    /// Multi-line editable text, e.g. the prompt box.
    Text(String),
    /// Read-only row such as a settings summary.
    Info(String),
}

pub struct HostWidget {
    pub id:    String,
    pub label: String,
    pub kind:  WidgetKind,
}

/// Ordered widget registry plus the panels injected after anchors.
#[derive(Default)]
pub struct DemoHost {
    pub widgets: Vec<HostWidget>,
    pub panels:  Vec<(String, PanelView)>,
}

impl DemoHost {
    pub fn video_generator() -> Self {
        let w = |id: &str, label: &str, kind| HostWidget { id: id.into(), label: label.into(), kind };
        Self {
            widgets: vec![
                w("prompts", "Prompts (one per line)", WidgetKind::Text(String::new())),
                w("resolution", "Resolution", WidgetKind::Info("832x480".into())),
                w("loras_multipliers", "Loras multipliers", WidgetKind::Info("1.0".into())),
            ],
            panels: Vec::new(),
        }
    }

    fn widget(&self, id: &str) -> Option<&HostWidget> { self.widgets.iter().find(|w| w.id == id) }
}

impl UiHost for DemoHost {
    fn has_component(&self, id: &str) -> bool { self.widget(id).is_some() }

    fn read_text(&self, id: &str) -> Option<String> {
        match &self.widget(id)?.kind {
            WidgetKind::Text(t) => Some(t.clone()),
            WidgetKind::Info(_) => None,
        }
    }

    fn write_text(&mut self, id: &str, text: String) -> Result<(), HostError> {
        let w = self.widgets.iter_mut().find(|w| w.id == id)
            .ok_or_else(|| HostError::UnknownComponent(id.into()))?;
        match &mut w.kind {
            WidgetKind::Text(t) => { *t = text; Ok(()) }
            WidgetKind::Info(_) => Err(HostError::NotEditable(id.into())),
        }
    }

    fn insert_after(&mut self, anchor: &str, panel: PanelState) -> Result<(), HostError> {
        if !self.has_component(anchor) { return Err(HostError::UnknownComponent(anchor.into())); }
        self.panels.push((anchor.to_string(), PanelView::new(panel)));
        Ok(())
    }
}

pub struct HelperApp {
    pub host:           DemoHost,
    pub plugin:         MultiAnglePlugin,
    pub injection:      Option<Injection>,
    pub status_message: String,
    pub status_timer:   f32,
    pub dark_mode:      bool,
}

impl Default for HelperApp {
    fn default() -> Self {
        let plugin = MultiAnglePlugin::new(config::load_or_default());
        let mut host = DemoHost::video_generator();
        debug!(version = PLUGIN_VERSION, requested = ?plugin.requested_components(), "{PLUGIN_DESCRIPTION}");
        let injection = plugin.post_ui_setup(&mut host);
        Self { host, plugin, injection, status_message: String::new(), status_timer: 0.0, dark_mode: true }
    }
}

impl HelperApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let app = Self::default();
        cc.egui_ctx.set_theme(if app.dark_mode { egui::Theme::Dark } else { egui::Theme::Light });
        app
    }

    pub fn set_status(&mut self, msg: &str, dur: f32) {
        self.status_message = msg.to_string(); self.status_timer = dur;
    }

    fn handle(&mut self, ctx: &Context, idx: usize, action: PanelAction) {
        match action {
            PanelAction::Copy(text) => {
                ctx.copy_text(text);
                self.set_status("✅ Copied to clipboard", 2.0);
            }
            PanelAction::Apply => {
                let Some(state) = self.host.panels.get(idx).map(|(_, v)| v.state.clone()) else { return };
                match self.plugin.apply(&mut self.host, &state) {
                    Ok(())  => self.set_status("✅ Applied to Prompts box", 2.0),
                    Err(e)  => {
                        warn!(error = %e, "apply failed");
                        self.set_status(&format!("⚠ {e}"), 3.0);
                    }
                }
            }
        }
    }
}

fn render_widget(ui: &mut egui::Ui, w: &mut HostWidget) {
    ui.label(RichText::new(&w.label).strong());
    match &mut w.kind {
        WidgetKind::Text(t) => {
            ui.add(egui::TextEdit::multiline(t).desired_width(f32::INFINITY).desired_rows(6));
        }
        WidgetKind::Info(v) => { ui.label(v.as_str()); }
    }
    ui.add_space(6.0);
}

impl eframe::App for HelperApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                ui.heading("🎬 Video Generator");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button(if self.dark_mode { "☀ Light" } else { "🌙 Dark" }).clicked() {
                        self.dark_mode = !self.dark_mode;
                        ctx.set_theme(if self.dark_mode { egui::Theme::Dark } else { egui::Theme::Light });
                    }
                });
            });
            ui.add_space(4.0);
        });

        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match &self.injection {
                    Some(inj) => ui.weak(format!("{PLUGIN_NAME} {PLUGIN_VERSION} after '{}', prompts: {}",
                        inj.anchor, inj.prompt_target.as_deref().unwrap_or("none"))),
                    None      => ui.weak(format!("{PLUGIN_NAME} not injected")),
                };
                if !self.status_message.is_empty() {
                    ui.separator();
                    ui.label(&self.status_message);
                }
            });
        });

        let mut actions = Vec::new();
        CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                let DemoHost { widgets, panels } = &mut self.host;
                for w in widgets.iter_mut() {
                    render_widget(ui, w);
                    for (i, (anchor, view)) in panels.iter_mut().enumerate() {
                        if *anchor != w.id { continue; }
                        if let Some(a) = render_panel(ui, &format!("panel_{i}"), view) { actions.push((i, a)); }
                        ui.separator();
                    }
                }
            });
        });
        for (i, action) in actions { self.handle(ctx, i, action); }

        if self.status_timer > 0.0 {
            self.status_timer -= ctx.input(|i| i.stable_dt);
            if self.status_timer <= 0.0 { self.status_message.clear(); }
            ctx.request_repaint();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::PreviewSource;
    use crate::taxonomy::REFERENCE_POSE;
    use pretty_assertions::assert_eq;

    #[test]
    fn demo_host_gets_panel_after_loras() {
        let app = HelperApp::default();
        let inj = app.injection.as_ref().unwrap();
        assert_eq!(inj.anchor, "loras_multipliers");
        assert_eq!(inj.prompt_target.as_deref(), Some("prompts"));
        assert_eq!(app.host.panels.len(), 1);
    }

    #[test]
    fn apply_action_updates_prompt_box() {
        let mut app = HelperApp::default();
        app.host.write_text("prompts", "a dancer on stage".into()).unwrap();
        let view = &mut app.host.panels[0].1;
        view.state.apply_source = PreviewSource::Builder;
        view.state.refresh_preview();

        app.handle(&Context::default(), 0, PanelAction::Apply);
        assert_eq!(app.host.read_text("prompts").unwrap(), format!("a dancer on stage\n\n{REFERENCE_POSE}"));
        assert!(app.status_message.contains("Applied"));
    }

    #[test]
    fn info_widgets_are_not_editable() {
        let mut host = DemoHost::video_generator();
        assert_eq!(host.read_text("resolution"), None);
        assert_eq!(host.write_text("resolution", "x".into()), Err(HostError::NotEditable("resolution".into())));
        assert_eq!(host.write_text("missing", "x".into()), Err(HostError::UnknownComponent("missing".into())));
        assert!(host.insert_after("missing", PanelState::new(&Default::default(), None)).is_err());
    }
}
