// src/app/clipboard.rs
//
// Presse-papiers réels derrière `ClipboardSink`
// ---------------------------------------------
// - NATIF : arboard (presse-papiers système), ouvert à chaque copie
// - WEB   : egui relaie la copie au navigateur (ctx.copy_text)

use eframe::egui;

use crate::calc::{ClipboardError, ClipboardSink};

#[cfg(not(target_arch = "wasm32"))]
pub struct SystemClipboard;

#[cfg(not(target_arch = "wasm32"))]
impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ClipboardError::Access(e.to_string()))?;

        clipboard
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Write(e.to_string()))
    }
}

/// Copie confiée à egui (sortie de frame). Ne peut pas échouer de notre côté.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub struct EguiClipboard<'a> {
    pub ctx: &'a egui::Context,
}

impl ClipboardSink for EguiClipboard<'_> {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.ctx.copy_text(text.to_string());
        Ok(())
    }
}
