// src/app/view.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// - Écran : badge RAD/DEG, expression rendue (^, π, e), valeur courante, copie
// - Pavé  : 5 colonnes, une touche = un InputEvent (voir keypad.rs)
// - Historique : plus récent d’abord, clic = rappel, corbeille = tout vider
// - Toasts : coin bas-droit, expiration gérée par state.rs
//
// La vue ne calcule rien : elle collecte les clics puis relaie à AppCalc
// une fois le rendu terminé (pas d’emprunt croisé pendant le dessin).

use eframe::egui;

use super::keypad::{Key, LAYOUT};
use super::state::AppCalc;
use crate::calc::{EventKind, InputEvent};

/// Hauteur d’une touche du pavé.
const HAUTEUR_TOUCHE: f32 = 44.0;

const ESPACE: f32 = 6.0;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        ui.spacing_mut().item_spacing = egui::vec2(ESPACE, ESPACE);
        let now = ui.input(|i| i.time);

        ui.horizontal(|ui| {
            ui.heading("Calculatrice scientifique");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.toggle_value(&mut self.show_history, "History");
            });
        });
        ui.add_space(4.0);

        if self.ui_ecran(ui) {
            let ctx = ui.ctx().clone();
            self.copy_display(&ctx, now);
        }

        ui.add_space(8.0);

        if let Some(ev) = self.ui_pave(ui) {
            self.press(ev, now);
        }
    }

    /// Écran. Renvoie `true` si l’utilisateur a demandé une copie.
    fn ui_ecran(&self, ui: &mut egui::Ui) -> bool {
        let mut copie = false;
        let erreur = self.calc.state().is_error();

        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.set_min_width(ui.available_width());

                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(self.calc.angle_mode().label())
                            .small()
                            .strong(),
                    )
                    .on_hover_text("Angle mode");

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let peut_copier = self.calc.copy_text().is_some();
                        let resp = ui
                            .add_enabled(peut_copier, egui::Button::new("📋").small())
                            .on_hover_text("Copy to clipboard");
                        copie = resp.clicked();

                        ui.monospace(self.calc.expression_for_display());
                    });
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let mut texte = egui::RichText::new(self.calc.display())
                        .monospace()
                        .size(34.0);
                    if erreur {
                        texte = texte.color(ui.visuals().error_fg_color);
                    }
                    ui.label(texte);
                });
            });

        copie
    }

    /// Pavé. Renvoie la touche cliquée (au plus une par frame).
    fn ui_pave(&self, ui: &mut egui::Ui) -> Option<InputEvent> {
        let largeur = ((ui.available_width() - 4.0 * ESPACE) / 5.0).max(40.0);
        let taille = egui::vec2(largeur, HAUTEUR_TOUCHE);
        let mut cliquee = None;

        egui::Grid::new("pave_scientifique")
            .num_columns(5)
            .spacing([ESPACE, ESPACE])
            .show(ui, |ui| {
                for rangee in LAYOUT.iter() {
                    for key in rangee {
                        if Self::bouton(ui, key, taille) {
                            cliquee = Some(key.event());
                        }
                    }
                    ui.end_row();
                }
            });

        cliquee
    }

    fn bouton(ui: &mut egui::Ui, key: &Key, taille: egui::Vec2) -> bool {
        let mut bouton = egui::Button::new(egui::RichText::new(key.label).size(18.0));
        match key.kind {
            EventKind::Equals => bouton = bouton.fill(ui.visuals().selection.bg_fill),
            EventKind::Control => bouton = bouton.fill(ui.visuals().faint_bg_color),
            _ => {}
        }

        let mut resp = ui.add_sized(taille, bouton);
        if !key.hint.is_empty() {
            resp = resp.on_hover_text(key.hint);
        }

        // le clavier physique reste à la machine d’état, pas au bouton focus
        if resp.clicked() {
            resp.surrender_focus();
            return true;
        }
        false
    }

    /// Panneau historique (plus récent d’abord).
    pub fn ui_history(&mut self, ui: &mut egui::Ui) {
        let mut rappel: Option<u64> = None;
        let mut vider = false;

        let historique = self.calc.history();
        ui.horizontal(|ui| {
            ui.heading("History");
            ui.weak(format!("{}/{}", historique.len(), historique.capacity()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let resp = ui
                    .add_enabled(!historique.is_empty(), egui::Button::new("🗑"))
                    .on_hover_text("Clear history");
                vider = resp.clicked();
            });
        });
        ui.separator();

        if historique.is_empty() {
            ui.weak("No history yet.");
        }

        let dernier = historique.newest().map(|e| e.id);
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for entry in historique.iter() {
                    let texte = format!(
                        "{}\n= {}",
                        crate::engine::render_expression(&entry.expression),
                        entry.result
                    );
                    let resp = ui
                        .add_sized(
                            [ui.available_width(), 40.0],
                            egui::Button::new(egui::RichText::new(texte).monospace())
                                .selected(Some(entry.id) == dernier),
                        )
                        .on_hover_text("Use this result");
                    if resp.clicked() {
                        rappel = Some(entry.id);
                    }
                }
            });

        if vider {
            self.clear_history();
        }
        if let Some(id) = rappel {
            self.recall(id);
        }
    }

    /// Toasts empilés en bas à droite.
    pub fn ui_toasts(&self, ctx: &egui::Context) {
        if self.toasts.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toasts"))
            .anchor(egui::Align2::RIGHT_BOTTOM, [-12.0, -12.0])
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    egui::Frame::popup(ui.style()).show(ui, |ui| {
                        let couleur = if toast.notice.is_error() {
                            ui.visuals().error_fg_color
                        } else {
                            ui.visuals().strong_text_color()
                        };
                        ui.label(egui::RichText::new(&toast.notice.title).strong().color(couleur));
                        ui.label(&toast.notice.message);
                    });
                }
            });
    }

    /// Copie de l’écran : système en natif, navigateur en web.
    #[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
    pub fn copy_display(&mut self, ctx: &egui::Context, now: f64) {
        #[cfg(not(target_arch = "wasm32"))]
        let mut sink = super::clipboard::SystemClipboard;
        #[cfg(target_arch = "wasm32")]
        let mut sink = super::clipboard::EguiClipboard { ctx };

        self.copy(&mut sink, now);
    }
}
