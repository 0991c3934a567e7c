// src/engine/error.rs
//
// Erreurs du moteur
// -----------------
// Trois familles seulement, celles que l’UI sait afficher.
// Le détail (`String`) sert aux logs, jamais au toast.

use thiserror::Error;

/// Classification exposée à l’UI (badge, toast, tests).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Calculation,
    InvalidInput,
}

impl ErrorKind {
    /// Message utilisateur (toast).
    pub fn message(self) -> &'static str {
        match self {
            ErrorKind::Syntax => "Syntax Error",
            ErrorKind::Calculation => "Calculation Error",
            ErrorKind::InvalidInput => "Invalid input",
        }
    }
}

#[derive(Error, Clone, Debug, PartialEq)]
pub enum EvalError {
    /// Suite de jetons mal formée (parenthèse orpheline, opérateur sans opérande…).
    #[error("Syntax Error: {0}")]
    Syntax(String),

    /// Expression bien formée mais résultat NaN / infini.
    #[error("Calculation Error: {0}")]
    Calculation(String),

    /// Caractère ou identifiant hors liste blanche.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl EvalError {
    pub fn syntax(msg: impl Into<String>) -> Self {
        EvalError::Syntax(msg.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Syntax(_) => ErrorKind::Syntax,
            EvalError::Calculation(_) => ErrorKind::Calculation,
            EvalError::InvalidInput(_) => ErrorKind::InvalidInput,
        }
    }
}
