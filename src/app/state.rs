//! src/app/state.rs
//!
//! État UI (sans vue).
//!
//! Rôle : porter la calculatrice (noyau clavier + historique) et les toasts
//! en cours. Toute logique de calcul reste dans `calc` ; ici on ne fait que
//! relayer les touches et horodater les messages.
//!
//! Contrats :
//! - Une touche = un appel à `Calculator::press`, traité jusqu’au bout.
//! - Les toasts expirent d’eux-mêmes (horloge egui, en secondes).

use crate::calc::{Calculator, ClipboardSink, InputEvent, Notice};
use crate::settings::Settings;

/// Durée d’affichage d’un toast d’erreur (s).
const DUREE_ERREUR: f64 = 3.0;

/// Durée d’affichage d’un toast d’info (s).
const DUREE_INFO: f64 = 2.0;

/// Garde-fou : pas plus de N toasts empilés.
const TOASTS_MAX: usize = 4;

#[derive(Clone, Debug)]
pub struct Toast {
    pub notice: Notice,
    pub expires_at: f64,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    pub calc: Calculator,
    pub toasts: Vec<Toast>,
    // panneau historique ouvert ?
    pub show_history: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl AppCalc {
    pub fn new(settings: Settings) -> Self {
        Self {
            calc: Calculator::new(settings),
            toasts: Vec::new(),
            show_history: true,
        }
    }

    /* ------------------------ Actions (état seulement) ------------------------ */

    /// Relaye une touche ; un éventuel message devient un toast.
    pub fn press(&mut self, event: InputEvent, now: f64) {
        if let Some(n) = self.calc.press(&event) {
            self.push_notice(n, now);
        }
    }

    pub fn recall(&mut self, id: u64) {
        self.calc.recall(id);
    }

    pub fn clear_history(&mut self) {
        self.calc.clear_history();
    }

    pub fn copy(&mut self, sink: &mut dyn ClipboardSink, now: f64) {
        if let Some(n) = self.calc.copy_to(sink) {
            self.push_notice(n, now);
        }
    }

    pub fn push_notice(&mut self, notice: Notice, now: f64) {
        let duree = if notice.is_error() {
            DUREE_ERREUR
        } else {
            DUREE_INFO
        };
        self.toasts.push(Toast {
            notice,
            expires_at: now + duree,
        });
        if self.toasts.len() > TOASTS_MAX {
            let surplus = self.toasts.len() - TOASTS_MAX;
            self.toasts.drain(..surplus);
        }
    }

    pub fn expire_toasts(&mut self, now: f64) {
        self.toasts.retain(|t| t.expires_at > now);
    }
}
