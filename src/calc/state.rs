//! src/calc/state.rs
//!
//! Machine d’état du clavier.
//!
//! Rôle : transformer UN événement clavier en un NOUVEL état, sans rien
//! modifier en place : `apply(&état, &événement) -> Step`.
//!
//! Contrats :
//! - `expression` est toujours vide ou re-fermable (parenthèses) en une
//!   expression valide ; la queue est relue via lexeme.rs.
//! - `display` est l’écho court de la dernière saisie, pas l’expression.
//! - Seul Equals appelle le moteur. Aucune erreur ne sort d’ici : un échec
//!   devient la sentinelle "Error" + un `Effect` pour le toast.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::event::{EventKind, InputEvent};
use super::lexeme::{
    is_unary_minus_at, last_token_len, number_in_exponent, operator_glyph,
    strip_dangling_exponent, tail, trailing_number, trailing_operator, Tail, CONSTANTS,
    FUNCTIONS, OPERATORS,
};
use crate::engine::{self, constant_numeral, format_result, ErrorKind, Outcome};
use crate::settings::Settings;

/// Valeur d’écran après une évaluation ratée.
pub const ERROR_SENTINEL: &str = "Error";

/// Écran “vide”.
pub const ZERO: &str = "0";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            AngleMode::Radians => AngleMode::Degrees,
            AngleMode::Degrees => AngleMode::Radians,
        }
    }

    /// Badge UI.
    pub fn label(self) -> &'static str {
        match self {
            AngleMode::Radians => "RAD",
            AngleMode::Degrees => "DEG",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculatorState {
    pub expression: String,
    pub display: String,
    pub angle_mode: AngleMode,
    pub overwrite_next: bool,
    pub last_was_result: bool,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(AngleMode::default())
    }
}

/// Ce que la transition demande au propriétaire (historique, toast).
#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    None,
    /// Évaluation réussie : `expression` est la forme équilibrée évaluée.
    Computed { expression: String, result: String },
    Failed(ErrorKind),
    /// Garde-fou de longueur : état inchangé.
    Rejected,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub state: CalculatorState,
    pub effect: Effect,
}

impl CalculatorState {
    pub fn new(angle_mode: AngleMode) -> Self {
        Self {
            expression: String::new(),
            display: ZERO.to_string(),
            angle_mode,
            overwrite_next: true,
            last_was_result: false,
        }
    }

    pub fn is_error(&self) -> bool {
        self.display == ERROR_SENTINEL
    }

    /// AC : tout sauf le mode d’angle.
    fn reset(&mut self) {
        *self = Self::new(self.angle_mode);
    }

    /// Rappel d’historique : le résultat devient le point de départ, sans réévaluer.
    pub fn recalled(&self, result: &str) -> Self {
        Self {
            expression: result.to_string(),
            display: result.to_string(),
            angle_mode: self.angle_mode,
            overwrite_next: true,
            last_was_result: true,
        }
    }
}

/// Transition pure : (état, événement) -> (nouvel état, effet).
pub fn apply(state: &CalculatorState, event: &InputEvent, settings: &Settings) -> Step {
    let mut s = state.clone();

    // Après une erreur, toute touche autre que AC/DEL repart de zéro.
    if s.is_error() && event.kind != EventKind::Control {
        s.reset();
    }

    if !event.kind.bypasses_length_guard() && s.expression.len() > settings.max_input_length {
        debug!(len = s.expression.len(), "saisie refusée : longueur max");
        return Step {
            state: state.clone(),
            effect: Effect::Rejected,
        };
    }

    let v = event.value.as_str();
    let effect = match event.kind {
        EventKind::Digit => match v.chars().next() {
            Some(d) if v.len() == 1 && d.is_ascii_digit() => {
                digit(&mut s, d);
                Effect::None
            }
            _ => ignore(state, event),
        },
        EventKind::Decimal => {
            decimal(&mut s);
            Effect::None
        }
        EventKind::Operator => match OPERATORS.iter().find(|op| **op == v) {
            Some(op) => {
                operator(&mut s, op);
                Effect::None
            }
            None => ignore(state, event),
        },
        EventKind::Function => match FUNCTIONS.iter().find(|f| **f == v) {
            Some(f) => {
                let nom = f.trim_end_matches('(');
                open_value(&mut s, f, nom.to_string());
                Effect::None
            }
            None => ignore(state, event),
        },
        EventKind::Constant => match (CONSTANTS.iter().find(|c| **c == v), constant_numeral(v)) {
            (Some(c), Some(numeral)) => {
                open_value(&mut s, c, numeral);
                Effect::None
            }
            _ => ignore(state, event),
        },
        EventKind::Parenthesis => match v {
            "(" => {
                open_value(&mut s, "(", "(".to_string());
                Effect::None
            }
            ")" => {
                close_paren(&mut s);
                Effect::None
            }
            _ => ignore(state, event),
        },
        EventKind::Equals => equals(&mut s, settings),
        EventKind::Control => match v {
            "AC" => {
                s.reset();
                Effect::None
            }
            "DEL" => {
                delete(&mut s);
                Effect::None
            }
            _ => ignore(state, event),
        },
        EventKind::Mode => {
            s.angle_mode = s.angle_mode.toggled();
            s.last_was_result = false;
            Effect::None
        }
        EventKind::Sign => {
            sign(&mut s);
            Effect::None
        }
    };

    Step { state: s, effect }
}

fn ignore(state: &CalculatorState, event: &InputEvent) -> Effect {
    warn!(kind = ?event.kind, value = %event.value, expression = %state.expression, "touche inconnue ignorée");
    Effect::None
}

/* ------------------------ Saisie des nombres ------------------------ */

fn digit(s: &mut CalculatorState, d: char) {
    if s.last_was_result {
        s.expression.clear();
    } else if !s.overwrite_next && trailing_number(&s.expression) == ZERO {
        // "0" puis "5" => "5", pas "05" (y compris "-0" => "-5")
        s.expression.pop();
    }

    // ")5" / "PI5" : nouvelle opérande => multiplication implicite
    if tail(&s.expression) == Tail::Value {
        s.expression.push('*');
    }
    s.expression.push(d);

    // écran figé : il repart du chiffre, sauf au milieu d’un exposant
    s.display = if s.overwrite_next && !number_in_exponent(&s.expression) {
        d.to_string()
    } else {
        number_echo(&s.expression)
    };
    s.overwrite_next = false;
    s.last_was_result = false;
}

/// Écho d’écran du nombre final : mantisse et exposant, avec son '-' unaire.
fn number_echo(expr: &str) -> String {
    let nombre = trailing_number(expr);
    let mut debut = expr.len() - nombre.len();

    if number_in_exponent(expr) {
        // "1.5e+21" : on remonte jusqu’au début de la mantisse
        let mut avant = &expr[..debut];
        if avant.ends_with(|c: char| c == '+' || c == '-') {
            avant = &avant[..avant.len() - 1];
        }
        let sans_e = &avant[..avant.len() - 1];
        debut = sans_e.len() - trailing_number(sans_e).len();
    }

    let negatif =
        debut > 0 && expr[..debut].ends_with('-') && is_unary_minus_at(expr, debut - 1);
    if negatif {
        format!("-{}", &expr[debut..])
    } else {
        expr[debut..].to_string()
    }
}

fn decimal(s: &mut CalculatorState) {
    if s.last_was_result {
        s.expression.clear();
    }
    strip_dangling_exponent(&mut s.expression);

    let t = tail(&s.expression);
    if t == Tail::Value {
        s.expression.push('*');
    }

    if s.overwrite_next || s.last_was_result || t == Tail::Value {
        s.expression.push_str("0.");
        s.display = "0.".to_string();
    } else if t == Tail::Number {
        // un seul '.' par nombre, jamais dans un exposant
        let nombre = trailing_number(&s.expression);
        if !nombre.contains('.') && !number_in_exponent(&s.expression) {
            s.expression.push('.');
            s.display.push('.');
        }
    } else {
        // après '-' unaire ou '(' : le nombre commence par "0."
        s.expression.push_str("0.");
        s.display = if t == Tail::UnaryMinus {
            "-0.".to_string()
        } else {
            "0.".to_string()
        };
    }

    s.overwrite_next = false;
    s.last_was_result = false;
}

/* ------------------------ Opérateurs ------------------------ */

fn operator(s: &mut CalculatorState, op: &str) {
    // un résultat se prolonge : "42" puis "+" => "42+"
    s.last_was_result = false;

    match tail(&s.expression) {
        Tail::Empty | Tail::Open => {
            // seul '-' peut ouvrir une opérande
            if op == "-" {
                s.expression.push('-');
                s.display = "-".to_string();
                s.overwrite_next = false;
            }
            return;
        }
        Tail::UnaryMinus => return,
        Tail::ExponentSign => {
            if op == "+" || op == "-" {
                s.expression.pop();
                s.expression.push_str(op);
                s.display = op.to_string();
            }
            return;
        }
        Tail::Exponent => {
            if op != "+" && op != "-" {
                s.expression.pop();
            }
            s.expression.push_str(op);
        }
        Tail::BinaryOp => {
            let precedent = trailing_operator(&s.expression).unwrap_or_default().to_string();
            if precedent == "*" && op == "*" {
                // "*" puis "*" => "**"
                s.expression.push('*');
            } else {
                s.expression.truncate(s.expression.len() - precedent.len());
                s.expression.push_str(op);
            }
        }
        Tail::Number | Tail::Value => s.expression.push_str(op),
    }

    let courant = trailing_operator(&s.expression).unwrap_or(op);
    s.display = operator_glyph(courant).to_string();
    s.overwrite_next = true;
}

/* ------------------------ Fonctions, constantes, '(' ------------------------ */

/// `token` part dans l’expression, `display` à l’écran.
fn open_value(s: &mut CalculatorState, token: &str, display: String) {
    if s.last_was_result {
        s.expression.clear();
    }
    strip_dangling_exponent(&mut s.expression);

    // "5(" => "5*(" ; "PI sin(" => "PI*sin("
    if matches!(tail(&s.expression), Tail::Number | Tail::Value) {
        s.expression.push('*');
    }

    s.expression.push_str(token);
    s.display = display;
    s.overwrite_next = true;
    s.last_was_result = false;
}

fn close_paren(s: &mut CalculatorState) {
    if s.last_was_result {
        return;
    }
    let ouvertes = s.expression.matches('(').count();
    let fermees = s.expression.matches(')').count();
    if ouvertes <= fermees {
        return;
    }

    strip_dangling_exponent(&mut s.expression);
    if !matches!(tail(&s.expression), Tail::Number | Tail::Value) {
        // "()" ou "2+)" : rien à fermer
        return;
    }

    s.expression.push(')');
    s.display = ")".to_string();
    s.overwrite_next = false;
}

/* ------------------------ Égal ------------------------ */

fn equals(s: &mut CalculatorState, settings: &Settings) -> Effect {
    if s.expression.is_empty() {
        return Effect::None;
    }

    let mut expr = s.expression.clone();
    strip_dangling_exponent(&mut expr);

    // un seul opérateur pendant toléré
    if matches!(tail(&expr), Tail::BinaryOp | Tail::UnaryMinus) {
        let n = trailing_operator(&expr).map_or(0, str::len);
        expr.truncate(expr.len() - n);
    }

    let expr = engine::balance_parens(&expr);

    match engine::evaluate(&expr, s.angle_mode) {
        Outcome::Empty => Effect::None,
        Outcome::Value(v) => {
            let result = format_result(v, settings.precision);
            debug!(expression = %expr, result = %result, mode = s.angle_mode.label(), "calcul");
            s.expression = result.clone();
            s.display = result.clone();
            s.last_was_result = true;
            s.overwrite_next = true;
            Effect::Computed {
                expression: expr,
                result,
            }
        }
        Outcome::Error(e) => {
            debug!(expression = %expr, error = %e, "calcul en erreur");
            s.display = ERROR_SENTINEL.to_string();
            s.last_was_result = true;
            s.overwrite_next = true;
            Effect::Failed(e.kind())
        }
    }
}

/* ------------------------ DEL ------------------------ */

/// Retire le dernier jeton atomique puis relit l’écran depuis la queue.
fn delete(s: &mut CalculatorState) {
    if s.last_was_result || s.is_error() || s.expression.is_empty() {
        s.reset();
        return;
    }

    let n = last_token_len(&s.expression);
    s.expression.truncate(s.expression.len() - n);

    if !trailing_number(&s.expression).is_empty() {
        s.display = number_echo(&s.expression);
        s.overwrite_next = false;
    } else if tail(&s.expression) == Tail::UnaryMinus {
        s.display = "-".to_string();
        s.overwrite_next = false;
    } else {
        s.display = ZERO.to_string();
        s.overwrite_next = true;
    }
}

/* ------------------------ +/- ------------------------ */

fn sign(s: &mut CalculatorState) {
    // sur un résultat : rien ne change, le résultat cesse juste d’en être un
    if s.last_was_result {
        s.last_was_result = false;
        return;
    }

    // "1.5e+21" : le signe d’exposant n’est pas un signe de nombre
    if number_in_exponent(&s.expression) {
        return;
    }

    let nombre = trailing_number(&s.expression).to_string();
    let non_nul = nombre.parse::<f64>().is_ok_and(|v| v != 0.0);

    if !s.overwrite_next && non_nul {
        // nombre en cours : bascule du '-' unaire juste devant lui
        let debut = s.expression.len() - nombre.len();
        let deja_negatif = debut > 0
            && s.expression[..debut].ends_with('-')
            && is_unary_minus_at(&s.expression, debut - 1);

        if deja_negatif {
            s.expression.remove(debut - 1);
            s.display = nombre;
        } else {
            s.expression.insert(debut, '-');
            s.display = format!("-{nombre}");
        }
        return;
    }

    match tail(&s.expression) {
        // écran figé : le signe vaut pour le PROCHAIN nombre
        Tail::BinaryOp | Tail::Open if s.overwrite_next => {
            s.expression.push('-');
            s.display = "-".to_string();
            s.overwrite_next = false;
        }
        Tail::UnaryMinus => {
            s.expression.pop();
            s.display = ZERO.to_string();
            s.overwrite_next = true;
        }
        _ => {}
    }
}
