// src/engine/tokens.rs
//
// Tokenisation de la forme EXÉCUTABLE (après transform.rs).
// La grammaire acceptée ici est la liste blanche : tout le reste est refusé
// AVANT la moindre évaluation (InvalidInput).

use super::error::EvalError;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),

    // Constante de la bibliothèque (math.pi, math.e), déjà résolue.
    Const(f64),

    // Fonction de la bibliothèque (math.sin, math.pow…), nom sans préfixe.
    Func(&'static str),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Pow, // ** ou ^

    LPar,
    RPar,
    Comma,
}

/// Préfixe de tout nom exécutable.
pub const PREFIXE: &str = "math.";

/// Constantes autorisées (nom sans préfixe).
fn constante(nom: &str) -> Option<f64> {
    match nom {
        "pi" => Some(std::f64::consts::PI),
        "e" => Some(std::f64::consts::E),
        _ => None,
    }
}

/// Fonctions autorisées : (nom, arité).
pub const FONCTIONS: &[(&str, usize)] = &[
    ("sqrt", 1),
    ("log10", 1),
    ("ln", 1),
    ("sin", 1),
    ("cos", 1),
    ("tan", 1),
    ("asin", 1),
    ("acos", 1),
    ("atan", 1),
    ("to_radians", 1),
    ("to_degrees", 1),
    ("abs", 1),
    ("exp", 1),
    ("pow", 2),
    ("min", 2),
    ("max", 2),
];

pub fn arite(nom: &str) -> Option<usize> {
    FONCTIONS.iter().find(|(n, _)| *n == nom).map(|(_, a)| *a)
}

fn fonction(nom: &str) -> Option<&'static str> {
    FONCTIONS.iter().find(|(n, _)| *n == nom).map(|(n, _)| *n)
}

/// Tokenize une chaîne exécutable.
/// Supporte:
/// - nombres décimaux (12, 0.5, .5, 5.) + exposant (1.5e+21, 2e-7)
/// - opérateurs + - * / % ** ^
/// - parenthèses ( ) et virgule
/// - noms `math.xxx` de la liste blanche
pub fn tokenize(s: &str) -> Result<Vec<Tok>, EvalError> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        match c {
            '(' => {
                out.push(Tok::LPar);
                i += 1;
                continue;
            }
            ')' => {
                out.push(Tok::RPar);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Comma);
                i += 1;
                continue;
            }
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" = puissance
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Pow);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '/' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '%' => {
                out.push(Tok::Percent);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Pow);
                i += 1;
                continue;
            }
            _ => {}
        }

        // Nombre : chiffres [. chiffres] [e [+-] chiffres]
        let debut_nombre =
            c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit());
        if debut_nombre {
            let start = i;
            let mut point = false;
            while i < chars.len() && (chars[i].is_ascii_digit() || (chars[i] == '.' && !point)) {
                if chars[i] == '.' {
                    point = true;
                }
                i += 1;
            }

            // exposant : seulement s’il est suivi d’au moins un chiffre
            if i < chars.len() && chars[i] == 'e' {
                let mut j = i + 1;
                if j < chars.len() && (chars[j] == '+' || chars[j] == '-') {
                    j += 1;
                }
                if j < chars.len() && chars[j].is_ascii_digit() {
                    while j < chars.len() && chars[j].is_ascii_digit() {
                        j += 1;
                    }
                    i = j;
                }
            }

            let txt: String = chars[start..i].iter().collect();
            let v = txt
                .parse::<f64>()
                .map_err(|_| EvalError::syntax(format!("nombre invalide: {txt}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        // Identifiants : [a-zA-Z_][a-zA-Z0-9_]* ( . [a-zA-Z_][a-zA-Z0-9_]* )*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() {
                let ch = chars[i];
                let suite_point = ch == '.'
                    && i + 1 < chars.len()
                    && (chars[i + 1].is_ascii_alphabetic() || chars[i + 1] == '_');
                if ch.is_ascii_alphanumeric() || ch == '_' || suite_point {
                    i += 1;
                } else {
                    break;
                }
            }
            let mot: String = chars[start..i].iter().collect();
            out.push(identifiant(&mot)?);
            continue;
        }

        return Err(EvalError::InvalidInput(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Liste blanche : seuls les noms `math.*` connus passent.
fn identifiant(mot: &str) -> Result<Tok, EvalError> {
    let inconnu = || EvalError::InvalidInput(format!("identifiant non autorisé: {mot}"));

    let nom = mot.strip_prefix(PREFIXE).ok_or_else(inconnu)?;
    if let Some(v) = constante(nom) {
        return Ok(Tok::Const(v));
    }
    fonction(nom).map(Tok::Func).ok_or_else(inconnu)
}

/// Format utilitaire (logs) : liste de jetons en texte.
pub fn format_tokens(tokens: &[Tok]) -> String {
    let mut out = Vec::with_capacity(tokens.len());
    for t in tokens {
        let s = match t {
            Tok::Num(v) | Tok::Const(v) => format!("{v}"),
            Tok::Func(nom) => format!("{PREFIXE}{nom}"),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Percent => "%".to_string(),
            Tok::Pow => "**".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
            Tok::Comma => ",".to_string(),
        };
        out.push(s);
    }
    out.join(" ")
}
