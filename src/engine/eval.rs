//! Moteur: évaluation (pipeline réel)
//!
//! canonique -> transform (constantes, unaires, trig, trig inverse, parenthèses)
//!           -> jetons (liste blanche) -> RPN -> valeur -> classification
//!
//! Aucune exécution dynamique : la grammaire de tokens.rs + rpn.rs EST la
//! surface exécutable.

use tracing::debug;

use super::error::EvalError;
use super::rpn::{eval_rpn, to_rpn};
use super::tokens::{format_tokens, tokenize};
use super::transform::to_executable;
use crate::calc::AngleMode;

/// Issue d’une évaluation.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    /// Entrée vide : ni valeur ni erreur (l’appelant ne fait rien).
    Empty,
    Value(f64),
    Error(EvalError),
}

/// API publique : évalue une expression canonique dans le mode d’angle donné.
pub fn evaluate(expr: &str, mode: AngleMode) -> Outcome {
    let s = expr.trim();
    if s.is_empty() {
        return Outcome::Empty;
    }

    match evaluate_inner(s, mode) {
        Ok(v) => Outcome::Value(v),
        Err(e) => {
            debug!(expression = s, error = %e, "évaluation refusée");
            Outcome::Error(e)
        }
    }
}

fn evaluate_inner(s: &str, mode: AngleMode) -> Result<f64, EvalError> {
    // 1..5) forme exécutable
    let exe = to_executable(s, mode);

    // 6) jetons (liste blanche) puis RPN
    let jetons = tokenize(&exe)?;
    let rpn = to_rpn(&jetons)?;
    debug!(canonique = s, executable = %exe, jetons = %format_tokens(&jetons), "pipeline");

    let v = eval_rpn(&rpn)?;

    // 7) classification
    if v.is_nan() {
        return Err(EvalError::Calculation("résultat non numérique".into()));
    }
    if v.is_infinite() {
        return Err(EvalError::Calculation("résultat infini".into()));
    }
    Ok(v)
}
