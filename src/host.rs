// host.rs — the seam between the helper panel and whatever UI hosts it.
//
// A host exposes named widgets. The plugin asks for a set of ids, picks an
// anchor and a prompt box from prioritized candidate lists, and hands back a
// panel to be placed right after the anchor.
use thiserror::Error;
use tracing::{error, info};

use crate::config::PanelConfig;
use crate::panel::PanelState;

pub const PLUGIN_NAME: &str = "Multi-Angle Prompt Helper";
pub const PLUGIN_ID: &str = "MultiAnglePromptHelperInjected";
pub const PLUGIN_VERSION: &str = "1.4.0";
pub const PLUGIN_DESCRIPTION: &str =
    "Injects a prompt helper into the Video Generator UI. Outputs degree/factor text.";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HostError {
    #[error("component '{0}' is not registered")]
    UnknownComponent(String),
    #[error("component '{0}' does not hold editable text")]
    NotEditable(String),
    #[error("no prompt text component was resolved")]
    MissingTarget,
    #[error("host refused to insert after '{anchor}': {reason}")]
    Rejected { anchor: String, reason: String },
}

pub trait UiHost {
    /// Absence is a plain `false`, never an error.
    fn has_component(&self, id: &str) -> bool;
    fn read_text(&self, id: &str) -> Option<String>;
    fn write_text(&mut self, id: &str, text: String) -> Result<(), HostError>;
    fn insert_after(&mut self, anchor: &str, panel: PanelState) -> Result<(), HostError>;
}

/// First candidate the host actually has, in priority order.
pub fn resolve_first<H: UiHost + ?Sized>(candidates: &[String], host: &H) -> Option<String> {
    candidates.iter().find(|id| host.has_component(id)).cloned()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Injection {
    pub anchor: String,
    pub prompt_target: Option<String>,
}

pub struct MultiAnglePlugin {
    config: PanelConfig,
}

impl MultiAnglePlugin {
    pub fn new(config: PanelConfig) -> Self { Self { config } }

    pub fn config(&self) -> &PanelConfig { &self.config }

    /// Ids the host should make visible to `post_ui_setup`.
    pub fn requested_components(&self) -> &[String] { &self.config.requested_components }

    /// Builds the panel and inserts it after the best anchor. Every failure is
    /// logged and swallowed so the host stays usable.
    pub fn post_ui_setup<H: UiHost + ?Sized>(&self, host: &mut H) -> Option<Injection> {
        let Some(anchor) = resolve_first(&self.config.anchor_candidates, &*host) else {
            info!(plugin = PLUGIN_ID, "No anchor found. Skipping injection.");
            return None;
        };
        let prompt_target = resolve_first(&self.config.prompt_candidates, &*host);
        let panel = PanelState::new(&self.config.defaults, prompt_target.clone());

        match host.insert_after(&anchor, panel) {
            Ok(()) => {
                info!(plugin = PLUGIN_ID, %anchor, prompt_target = ?prompt_target, "Injected panel");
                Some(Injection { anchor, prompt_target })
            }
            Err(e) => {
                error!(plugin = PLUGIN_ID, %anchor, error = %e, "injection failed during post_ui_setup");
                None
            }
        }
    }

    /// Writes the panel's preview into the resolved prompt box.
    pub fn apply<H: UiHost + ?Sized>(&self, host: &mut H, panel: &PanelState) -> Result<(), HostError> {
        let target = panel.prompt_target.as_deref().ok_or(HostError::MissingTarget)?;
        let existing = host.read_text(target).unwrap_or_default();
        host.write_text(target, panel.apply(&existing))
    }
}
