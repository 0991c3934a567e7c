//! Moteur d’évaluation
//!
//! Organisation interne :
//! - transform.rs : forme canonique -> forme exécutable (regex, degrés/radians)
//! - tokens.rs    : tokenisation = liste blanche
//! - rpn.rs       : shunting-yard + calcul de la RPN
//! - eval.rs      : pipeline complet + classification
//! - format.rs    : arrondi des résultats, rendu de l’expression
//! - error.rs     : SyntaxError / CalculationError / InvalidInput

pub mod error;
pub mod eval;
pub mod format;
pub mod rpn;
pub mod tokens;
pub mod transform;


#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use error::ErrorKind;
pub use eval::{evaluate, Outcome};
pub use format::{constant_numeral, format_result, render_expression};
pub use transform::balance_parens;
