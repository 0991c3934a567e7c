// src/calc/lexeme.rs
//
// Lecture de la QUEUE de l’expression canonique
// ---------------------------------------------
// Le clavier ne relit jamais toute l’expression : il lui suffit de savoir
// comment elle se termine (nombre en cours, opérateur, '(' …) et combien de
// caractères forment le dernier jeton.

/// Fonctions canoniques (avec leur '('). Les formes "arc" d’abord :
/// "arcsin(" se termine aussi par "sin(".
pub const FUNCTIONS: &[&str] = &[
    "arcsin(", "arccos(", "arctan(", "sin(", "cos(", "tan(", "sqrt(", "log(", "ln(",
];

/// Constantes canoniques.
pub const CONSTANTS: &[&str] = &["PI", "E"];

/// Opérateurs binaires acceptés par le clavier.
pub const OPERATORS: &[&str] = &["+", "-", "*", "/", "%", "**"];

/// Comment se termine l’expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tail {
    Empty,
    /// chiffre ou '.' : nombre en cours
    Number,
    /// ')' ou constante : valeur fermée
    Value,
    /// '(' (seule ou d’une fonction)
    Open,
    /// opérateur binaire (dont "**")
    BinaryOp,
    /// '-' en tête, après '(' ou après un opérateur
    UnaryMinus,
    /// "1e" : marqueur d’exposant sans chiffres
    Exponent,
    /// "1e+" / "1e-" : signe d’exposant sans chiffres
    ExponentSign,
}

fn is_op_char(c: char) -> bool {
    matches!(c, '+' | '-' | '*' | '/' | '%')
}

/// Le caractère en position `i` (un '-') est-il un moins unaire ?
pub fn is_unary_minus_at(expr: &str, i: usize) -> bool {
    match expr[..i].chars().next_back() {
        None => true,
        Some(p) => p == '(' || is_op_char(p),
    }
}

/// "…<chiffre>e" ?
fn ends_with_exponent_marker(expr: &str) -> bool {
    let mut it = expr.chars().rev();
    it.next() == Some('e') && it.next().is_some_and(|c| c.is_ascii_digit() || c == '.')
}

pub fn tail(expr: &str) -> Tail {
    let Some(last) = expr.chars().next_back() else {
        return Tail::Empty;
    };

    if last.is_ascii_digit() || last == '.' {
        return Tail::Number;
    }
    if last == ')' || CONSTANTS.iter().any(|c| expr.ends_with(c)) {
        return Tail::Value;
    }
    if last == '(' {
        return Tail::Open;
    }
    if last == 'e' && ends_with_exponent_marker(expr) {
        return Tail::Exponent;
    }
    if last == '+' || last == '-' {
        let avant = &expr[..expr.len() - 1];
        if ends_with_exponent_marker(avant) {
            return Tail::ExponentSign;
        }
    }
    if last == '-' && is_unary_minus_at(expr, expr.len() - 1) {
        return Tail::UnaryMinus;
    }
    if is_op_char(last) {
        return Tail::BinaryOp;
    }
    // inattendu (texte injecté par rappel) : traité comme une valeur
    Tail::Value
}

/// Nombre en cours de saisie : plus longue suite finale de chiffres / '.'.
pub fn trailing_number(expr: &str) -> &str {
    let debut = expr
        .char_indices()
        .rev()
        .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
        .last()
        .map_or(expr.len(), |(i, _)| i);
    &expr[debut..]
}

/// Le nombre final est-il l’exposant d’une notation scientifique ("1.5e+21") ?
pub fn number_in_exponent(expr: &str) -> bool {
    let n = trailing_number(expr);
    let avant = &expr[..expr.len() - n.len()];
    matches!(tail(avant), Tail::Exponent | Tail::ExponentSign)
}

/// Opérateur binaire final ("**" compte pour un seul jeton).
pub fn trailing_operator(expr: &str) -> Option<&str> {
    if expr.ends_with("**") {
        return Some(&expr[expr.len() - 2..]);
    }
    match expr.chars().next_back() {
        Some(c) if is_op_char(c) => Some(&expr[expr.len() - 1..]),
        _ => None,
    }
}

/// Longueur (en octets) du dernier jeton atomique, pour DEL :
/// un chiffre, un '.', un opérateur entier, une parenthèse,
/// un nom de fonction avec sa '(' ou un nom de constante.
pub fn last_token_len(expr: &str) -> usize {
    if let Some(f) = FUNCTIONS.iter().find(|f| expr.ends_with(*f)) {
        return f.len();
    }
    if let Some(c) = CONSTANTS.iter().find(|c| expr.ends_with(*c)) {
        return c.len();
    }
    if expr.ends_with("**") {
        return 2;
    }
    expr.chars().next_back().map_or(0, char::len_utf8)
}

/// Retire un exposant incomplet final ("1e", "1e+", "1e-").
pub fn strip_dangling_exponent(expr: &mut String) {
    if matches!(tail(expr), Tail::ExponentSign) {
        expr.pop();
    }
    if matches!(tail(expr), Tail::Exponent) {
        expr.pop();
    }
}

/// Libellé d’écran d’un opérateur canonique.
pub fn operator_glyph(op: &str) -> &str {
    match op {
        "**" => "^",
        autre => autre,
    }
}
