// src/engine/format.rs
//
// Affichage des nombres + rendu “joli” de l’expression canonique
// -------------------------------------------------------------
// - arrondi à N chiffres significatifs, puis forme canonique courte
//   (pas de zéros inutiles, pas de point final, jamais "-0")
// - notation scientifique au-delà de 1e21 / en deçà de 1e-6 : "1.5e+21"
//   (relisible par tokens.rs, donc réinjectable comme expression)
// - rendu : ** -> ^, PI -> π, E -> e

use lazy_static::lazy_static;
use regex::Regex;

/// Précision par défaut des résultats.
pub const PRECISION_RESULTAT: usize = 12;

/// Précision de l’écho d’une constante (π -> 3.141592654).
pub const PRECISION_CONSTANTE: usize = 10;

/// Bornes du format décimal “plein”.
const SCI_HAUT: f64 = 1e21;
const SCI_BAS: f64 = 1e-6;

lazy_static! {
    static ref CONSTANTES: Regex = Regex::new(r"\b(PI|E)\b").unwrap();
}

/// Arrondit `v` à `digits` chiffres significatifs (1..=17).
pub fn round_significant(v: f64, digits: usize) -> f64 {
    if v == 0.0 || !v.is_finite() {
        return v;
    }
    let d = digits.clamp(1, 17);
    // {:.Ne} : mantisse à (d-1) décimales => d chiffres significatifs
    format!("{:.*e}", d - 1, v).parse::<f64>().unwrap_or(v)
}

/// Forme canonique courte d’un nombre déjà arrondi.
pub fn format_number(v: f64) -> String {
    if v == 0.0 {
        return "0".to_string();
    }

    let a = v.abs();
    if (SCI_BAS..SCI_HAUT).contains(&a) {
        return format!("{v}");
    }

    // Rust écrit "1.5e21" / "1e-7" : on ajoute le signe d’exposant
    let brut = format!("{v:e}");
    match brut.split_once('e') {
        Some((mantisse, exp)) if !exp.starts_with('-') => format!("{mantisse}e+{exp}"),
        _ => brut,
    }
}

/// Arrondi + forme canonique : ce que l’écran affiche après "=".
pub fn format_result(v: f64, digits: usize) -> String {
    format_number(round_significant(v, digits))
}

/// Valeur affichée quand on tape une constante.
pub fn constant_numeral(nom: &str) -> Option<String> {
    let v = match nom {
        "PI" => std::f64::consts::PI,
        "E" => std::f64::consts::E,
        _ => return None,
    };
    Some(format_result(v, PRECISION_CONSTANTE))
}

/// Rendu de l’expression canonique pour la ligne du haut.
pub fn render_expression(canonique: &str) -> String {
    let s = canonique.replace("**", "^");
    CONSTANTES
        .replace_all(&s, |c: &regex::Captures| match &c[1] {
            "PI" => "π",
            _ => "e",
        })
        .into_owned()
}
