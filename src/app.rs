// src/app.rs
//
// Calculatrice scientifique: module App (racine)
// -----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (state, view, keypad, clipboard)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
//
// Clavier physique (global, aucun champ texte dans l’UI) :
// - chiffres, . + - * / % ^ ( ) =  -> touches du pavé
// - Enter = "=", Backspace = DEL, Escape = AC, Ctrl+C = copier l’écran

pub mod clipboard;
pub mod keypad;
pub mod state;
pub mod view;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use state::AppCalc;

use std::time::Duration;

use eframe::egui;

use crate::calc::InputEvent;

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.expire_toasts(now);

        self.raccourcis_clavier(ctx, now);

        if self.show_history {
            egui::SidePanel::right("historique")
                .resizable(true)
                .default_width(230.0)
                .show(ctx, |ui| {
                    self.ui_history(ui);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });

        self.ui_toasts(ctx);
        if !self.toasts.is_empty() {
            // pour que les toasts disparaissent sans attendre une entrée
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}

impl AppCalc {
    fn raccourcis_clavier(&mut self, ctx: &egui::Context, now: f64) {
        let (textes, copie) = ctx.input(|i| {
            let mut textes = Vec::new();
            let mut copie = false;
            for e in &i.events {
                match e {
                    egui::Event::Text(t) => textes.push(t.clone()),
                    egui::Event::Copy => copie = true,
                    _ => {}
                }
            }
            (textes, copie)
        });

        for t in textes {
            for c in t.chars() {
                if let Some(ev) = keypad::event_for_char(c) {
                    self.press(ev, now);
                }
            }
        }

        // Enter sur un bouton focus le déclencherait aussi : on laisse la main au bouton.
        let focus = ctx.memory(|m| m.focused().is_some());
        let (enter, backspace, esc) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Enter),
                i.key_pressed(egui::Key::Backspace),
                i.key_pressed(egui::Key::Escape),
            )
        });

        if enter && !focus {
            self.press(InputEvent::equals(), now);
        }
        if backspace {
            self.press(InputEvent::delete(), now);
        }
        if esc && !self.calc.is_idle() {
            self.press(InputEvent::all_clear(), now);
        }
        if copie {
            self.copy_display(ctx, now);
        }
    }
}
