// src/calc/event.rs
//
// Événements clavier : un par appui, immuables.

/// Famille d’une touche.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventKind {
    Digit,
    Decimal,
    Operator,
    Function,
    Constant,
    Parenthesis,
    Equals,
    Control,
    Mode,
    Sign,
}

impl EventKind {
    /// Touches qui passent malgré le garde-fou de longueur.
    pub fn bypasses_length_guard(self) -> bool {
        matches!(self, EventKind::Control | EventKind::Equals | EventKind::Mode)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputEvent {
    pub value: String,
    pub kind: EventKind,
}

impl InputEvent {
    pub fn new(kind: EventKind, value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            kind,
        }
    }

    pub fn digit(d: char) -> Self {
        Self::new(EventKind::Digit, d)
    }

    pub fn decimal() -> Self {
        Self::new(EventKind::Decimal, ".")
    }

    /// `+ - * / %` ou `**` (puissance).
    pub fn operator(op: &str) -> Self {
        Self::new(EventKind::Operator, op)
    }

    /// Nom canonique avec sa parenthèse : `sin(`, `arcsin(`, `sqrt(`…
    pub fn function(f: &str) -> Self {
        Self::new(EventKind::Function, f)
    }

    /// Nom canonique : `PI` ou `E`.
    pub fn constant(c: &str) -> Self {
        Self::new(EventKind::Constant, c)
    }

    pub fn open_paren() -> Self {
        Self::new(EventKind::Parenthesis, "(")
    }

    pub fn close_paren() -> Self {
        Self::new(EventKind::Parenthesis, ")")
    }

    pub fn equals() -> Self {
        Self::new(EventKind::Equals, "=")
    }

    pub fn all_clear() -> Self {
        Self::new(EventKind::Control, "AC")
    }

    pub fn delete() -> Self {
        Self::new(EventKind::Control, "DEL")
    }

    pub fn mode() -> Self {
        Self::new(EventKind::Mode, "mode")
    }

    pub fn sign() -> Self {
        Self::new(EventKind::Sign, "+/-")
    }
}
