//! src/calc/calculator.rs
//!
//! Propriétaire unique de l’état + de l’historique.
//!
//! Fait passer chaque touche dans `state::apply`, puis applique l’effet :
//! ajout à l’historique, toast d’erreur, refus de longueur. C’est la seule
//! surface que l’UI manipule.

use tracing::{debug, info, warn};

use super::clipboard::ClipboardSink;
use super::event::InputEvent;
use super::history::HistoryLog;
use super::notice::Notice;
use super::state::{apply, AngleMode, CalculatorState, Effect, ZERO};
use crate::engine::render_expression;
use crate::settings::Settings;

#[derive(Clone, Debug)]
pub struct Calculator {
    state: CalculatorState,
    history: HistoryLog,
    settings: Settings,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Calculator {
    pub fn new(settings: Settings) -> Self {
        Self {
            state: CalculatorState::new(settings.angle_mode),
            history: HistoryLog::with_capacity(settings.history_capacity),
            settings,
        }
    }

    /* ------------------------ Lecture (UI) ------------------------ */

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// Ligne du haut : expression avec ^, π, e.
    pub fn expression_for_display(&self) -> String {
        render_expression(&self.state.expression)
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.state.angle_mode
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /* ------------------------ Entrées ------------------------ */

    /// Traite une touche. Renvoie le message à montrer, s’il y en a un.
    pub fn press(&mut self, event: &InputEvent) -> Option<Notice> {
        let step = apply(&self.state, event, &self.settings);
        self.state = step.state;

        match step.effect {
            Effect::None => None,
            Effect::Computed { expression, result } => {
                let entry = self.history.push(expression, result);
                debug!(id = entry.id, "ajouté à l’historique");
                None
            }
            Effect::Failed(kind) => Some(Notice::evaluation(kind)),
            Effect::Rejected => Some(Notice::max_length()),
        }
    }

    /// Rappel d’une entrée d’historique (par id). `false` si l’id n’existe plus.
    pub fn recall(&mut self, id: u64) -> bool {
        match self.history.get(id) {
            Some(entry) => {
                self.state = self.state.recalled(&entry.result);
                true
            }
            None => false,
        }
    }

    pub fn clear_history(&mut self) {
        info!(entries = self.history.len(), "historique vidé");
        self.history.clear();
    }

    /* ------------------------ Presse-papiers ------------------------ */

    /// Texte à copier : l’écran, jamais la sentinelle.
    pub fn copy_text(&self) -> Option<&str> {
        let d = self.display();
        if d.is_empty() || self.state.is_error() {
            None
        } else {
            Some(d)
        }
    }

    /// Copie l’écran et renvoie le toast correspondant (rien si rien à copier).
    pub fn copy_to(&self, sink: &mut dyn ClipboardSink) -> Option<Notice> {
        let text = self.copy_text()?;
        match sink.set_text(text) {
            Ok(()) => Some(Notice::copied(text)),
            Err(e) => {
                warn!(error = %e, "copie impossible");
                Some(Notice::copy_failed())
            }
        }
    }

    /// Vrai si l’écran montre le “0” de repos.
    pub fn is_idle(&self) -> bool {
        self.state.expression.is_empty() && self.state.display == ZERO
    }
}
