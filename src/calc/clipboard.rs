// src/calc/clipboard.rs
//
// Couture avec le presse-papiers : le noyau fournit le texte, l’implémentation
// (arboard en natif, egui en web) répond succès / échec.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClipboardError {
    #[error("Failed to access clipboard: {0}")]
    Access(String),
    #[error("Failed to copy to clipboard: {0}")]
    Write(String),
}

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}
