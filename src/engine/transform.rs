// src/engine/transform.rs
//
// Forme CANONIQUE (celle que construit le clavier) -> forme EXÉCUTABLE
// ---------------------------------------------------------------------
// Étapes (ordre fixe, substitutions textuelles) :
// 1) constantes  : PI, E                 -> math.pi, math.e
// 2) unaires     : sqrt( log( ln(        -> math.sqrt( math.log10( math.ln(
// 3) trig        : sin( cos( tan(        -> math.sin( …  (+ to_radians en degrés)
// 4) trig inverse: arcsin( arccos( arctan( -> math.asin( … (+ to_degrees en degrés)
// 5) parenthèses : fermeture automatique (idempotente)
//
// Les noms canoniques ne sont jamais préfixés par "math." : une étape ne
// retouche donc jamais la sortie d’une étape précédente.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::calc::AngleMode;

lazy_static! {
    static ref CONSTANTES: Regex = Regex::new(r"\b(PI|E)\b").unwrap();
    static ref UNAIRES: Regex = Regex::new(r"\b(sqrt|log|ln)\(").unwrap();
    static ref TRIG: Regex = Regex::new(r"\b(sin|cos|tan)\(").unwrap();
    static ref TRIG_INVERSE: Regex = Regex::new(r"\barc(sin|cos|tan)\(").unwrap();
}

/// Pipeline complet (étapes 1 à 5).
pub fn to_executable(canonique: &str, mode: AngleMode) -> String {
    let s = constantes(canonique);
    let s = unaires(&s);
    let s = trig(&s, mode);
    let s = trig_inverse(&s, mode);
    balance_parens(&s)
}

/// Étape 1.
fn constantes(s: &str) -> String {
    CONSTANTES
        .replace_all(s, |c: &Captures| match &c[1] {
            "PI" => "math.pi",
            _ => "math.e",
        })
        .into_owned()
}

/// Étape 2.
fn unaires(s: &str) -> String {
    UNAIRES
        .replace_all(s, |c: &Captures| match &c[1] {
            "sqrt" => "math.sqrt(",
            "log" => "math.log10(",
            _ => "math.ln(",
        })
        .into_owned()
}

/// Étape 3 : l’argument est converti degrés -> radians AVANT l’appel.
fn trig(s: &str, mode: AngleMode) -> String {
    enveloppe(s, &TRIG, |f| match mode {
        AngleMode::Radians => (format!("math.{f}("), false),
        AngleMode::Degrees => (format!("math.{f}(math.to_radians("), true),
    })
}

/// Étape 4 : le résultat (radians) est reconverti en degrés APRÈS l’appel.
fn trig_inverse(s: &str, mode: AngleMode) -> String {
    enveloppe(s, &TRIG_INVERSE, |f| match mode {
        AngleMode::Radians => (format!("math.a{f}("), false),
        AngleMode::Degrees => (format!("math.to_degrees(math.a{f}("), true),
    })
}

/// Remplace chaque appel reconnu par `re` et, si demandé, ajoute une ')'
/// juste après la parenthèse fermante de l’appel.
///
/// Parcours de droite à gauche : une insertion ne décale jamais un appel
/// encore à traiter. Appel non fermé : rien à insérer, l’étape 5 fermera.
fn enveloppe<F>(s: &str, re: &Regex, remplace: F) -> String
where
    F: Fn(&str) -> (String, bool),
{
    let appels: Vec<(usize, usize, String)> = re
        .captures_iter(s)
        .filter_map(|c| {
            let m = c.get(0)?;
            Some((m.start(), m.end(), c[1].to_string()))
        })
        .collect();

    let mut out = s.to_string();
    for (debut, fin, f) in appels.into_iter().rev() {
        let (tete, ferme_en_plus) = remplace(&f);

        if ferme_en_plus {
            // `fin` pointe juste après la '(' de l’appel
            if let Some(pos) = parenthese_fermante(&out, fin) {
                out.insert(pos + 1, ')');
            }
        }
        out.replace_range(debut..fin, &tete);
    }
    out
}

/// Position de la ')' qui ferme la '(' située juste avant `apres`.
fn parenthese_fermante(s: &str, apres: usize) -> Option<usize> {
    let mut profondeur: usize = 1;
    for (i, b) in s.bytes().enumerate().skip(apres) {
        match b {
            b'(' => profondeur += 1,
            b')' => {
                profondeur -= 1;
                if profondeur == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

/// Étape 5 : ajoute des ')' jusqu’à équilibre. Sans effet si déjà équilibrée.
pub fn balance_parens(s: &str) -> String {
    let ouvertes = s.matches('(').count();
    let fermees = s.matches(')').count();

    let mut out = s.to_string();
    for _ in fermees..ouvertes {
        out.push(')');
    }
    out
}
