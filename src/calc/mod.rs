//! Clavier scientifique
//!
//! Organisation interne :
//! - event.rs      : événements clavier (une touche = un InputEvent)
//! - lexeme.rs     : lecture de la queue de l’expression canonique
//! - state.rs      : machine d’état pure (état, touche) -> état
//! - history.rs    : historique borné (plus récent d’abord)
//! - notice.rs     : messages pour les toasts
//! - clipboard.rs  : couture presse-papiers
//! - calculator.rs : propriétaire état + historique

pub mod calculator;
pub mod clipboard;
pub mod event;
pub mod history;
pub mod lexeme;
pub mod notice;
pub mod state;

#[cfg(test)]
mod tests_keypad;

pub use calculator::Calculator;
pub use clipboard::{ClipboardError, ClipboardSink};
pub use event::{EventKind, InputEvent};
pub use notice::Notice;
pub use state::AngleMode;
