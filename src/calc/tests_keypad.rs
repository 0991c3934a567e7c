//! Tests clavier de bout en bout : scénarios réels + séquences aléatoires.
//!
//! - scénarios : suites de touches telles qu’un utilisateur les tape
//! - campagne : séquences pseudo-aléatoires (seed fixe, budget temps) qui
//!   vérifient les invariants de la machine d’état à CHAQUE touche

use std::time::{Duration, Instant};

use super::state::{apply, CalculatorState, Effect, ERROR_SENTINEL};
use super::{AngleMode, Calculator, InputEvent};
use crate::engine::ErrorKind;
use crate::settings::Settings;

/// Petit langage de test : une lettre = une touche.
///
/// chiffres . + - * / % ( ) = telles quelles ; `^` = `**` ;
/// s c t = sin cos tan ; S C T = arcsin arccos arctan ;
/// r = sqrt ; l = log ; n = ln ; p = PI ; e = E ;
/// A = AC ; D = DEL ; M = mode ; ~ = +/-
fn touche(ch: char) -> InputEvent {
    match ch {
        '0'..='9' => InputEvent::digit(ch),
        '.' => InputEvent::decimal(),
        '+' | '-' | '*' | '/' | '%' => InputEvent::operator(&ch.to_string()),
        '^' => InputEvent::operator("**"),
        '(' => InputEvent::open_paren(),
        ')' => InputEvent::close_paren(),
        '=' => InputEvent::equals(),
        's' => InputEvent::function("sin("),
        'c' => InputEvent::function("cos("),
        't' => InputEvent::function("tan("),
        'S' => InputEvent::function("arcsin("),
        'C' => InputEvent::function("arccos("),
        'T' => InputEvent::function("arctan("),
        'r' => InputEvent::function("sqrt("),
        'l' => InputEvent::function("log("),
        'n' => InputEvent::function("ln("),
        'p' => InputEvent::constant("PI"),
        'e' => InputEvent::constant("E"),
        'A' => InputEvent::all_clear(),
        'D' => InputEvent::delete(),
        'M' => InputEvent::mode(),
        '~' => InputEvent::sign(),
        _ => panic!("touche de test inconnue: {ch}"),
    }
}

fn tape(c: &mut Calculator, touches: &str) {
    for ch in touches.chars() {
        c.press(&touche(ch));
    }
}

fn apres(touches: &str) -> Calculator {
    let mut c = Calculator::default();
    tape(&mut c, touches);
    c
}

/* ------------------------ Scénarios ------------------------ */

#[test]
fn kp_parentheses_fermees_par_egal() {
    let c = apres("2*(3+4=");
    assert_eq!(c.display(), "14");
    let e = c.history().newest().cloned().unwrap();
    assert_eq!((e.expression.as_str(), e.result.as_str()), ("2*(3+4)", "14"));
}

#[test]
fn kp_sinus_en_degres() {
    assert_eq!(apres("Ms90=").display(), "1");
    assert_eq!(apres("s90=").display(), "0.893996663601");
}

#[test]
fn kp_mode_bascule_en_cours_de_saisie() {
    // le mode est lu au moment de "="
    let c = apres("s90M=");
    assert_eq!(c.angle_mode(), AngleMode::Degrees);
    assert_eq!(c.display(), "1");
}

#[test]
fn kp_inverse_en_degres() {
    assert_eq!(apres("MS1=").display(), "90");
    assert_eq!(apres("MT1=").display(), "45");
}

#[test]
fn kp_division_par_zero() {
    let mut c = Calculator::default();
    tape(&mut c, "5/0");
    let n = c.press(&touche('=')).unwrap();
    assert_eq!(n.message, ErrorKind::Calculation.message());
    assert_eq!(c.display(), ERROR_SENTINEL);
    assert!(c.history().is_empty());

    tape(&mut c, "7");
    assert_eq!(c.display(), "7");
    assert_eq!(c.state().expression, "7");
}

#[test]
fn kp_domaine_hors_bornes() {
    let mut c = Calculator::default();
    tape(&mut c, "MS2");
    let n = c.press(&touche('=')).unwrap();
    assert_eq!(n.message, "Calculation Error");
    assert_eq!(c.display(), ERROR_SENTINEL);
}

#[test]
fn kp_erreur_de_syntaxe() {
    // "sin()" : la fermeture automatique ne suffit pas
    let mut c = Calculator::default();
    tape(&mut c, "s");
    let n = c.press(&touche('=')).unwrap();
    assert_eq!(n.message, "Syntax Error");
    tape(&mut c, "D");
    assert_eq!(c.display(), "0");
    assert!(c.is_idle());
}

#[test]
fn kp_resultat_prolonge() {
    let c = apres("6*7=+1=");
    assert_eq!(c.display(), "43");
    assert_eq!(c.history().len(), 2);
    assert_eq!(c.history().newest().unwrap().expression, "42+1");
}

#[test]
fn kp_resultat_puis_chiffre() {
    let c = apres("2+3=4");
    assert_eq!(c.state().expression, "4");
    assert_eq!(c.display(), "4");
}

#[test]
fn kp_decimaux() {
    let c = apres(".5+.25=");
    assert_eq!(c.history().newest().unwrap().expression, "0.5+0.25");
    assert_eq!(c.display(), "0.75");
}

#[test]
fn kp_constantes() {
    let c = apres("p");
    assert_eq!(c.display(), "3.141592654");
    assert_eq!(c.expression_for_display(), "π");

    let c = apres("2p=");
    assert_eq!(c.history().newest().unwrap().expression, "2*PI");
    assert_eq!(c.display(), "6.28318530718");

    assert_eq!(apres("ne=").display(), "1");
}

#[test]
fn kp_puissance_et_racine() {
    assert_eq!(apres("2^10=").display(), "1024");
    assert_eq!(apres("2**10=").display(), "1024");
    assert_eq!(apres("r16=").display(), "4");
    assert_eq!(apres("l1000=").display(), "3");
    assert_eq!(apres("(-3)^2=").display(), "9");
}

#[test]
fn kp_signe() {
    assert_eq!(apres("5~+3=").display(), "-2");
    assert_eq!(apres("4*~2=").display(), "-8");

    // sur un résultat, +/- ne change rien
    let c = apres("9=~");
    assert_eq!(c.display(), "9");
    assert_eq!(c.state().expression, "9");
    assert!(!c.state().last_was_result);
}

#[test]
fn kp_zero_apres_moins() {
    let c = apres("-05");
    assert_eq!(c.display(), "-5");
    assert_eq!(c.state().expression, "-5");
    assert_eq!(apres("4*~07=").display(), "-28");
}

#[test]
fn kp_del_jeton_par_jeton() {
    let mut c = apres("12+S");
    assert_eq!(c.state().expression, "12+arcsin(");
    tape(&mut c, "D");
    assert_eq!(c.state().expression, "12+");
    tape(&mut c, "D");
    assert_eq!(c.state().expression, "12");
    assert_eq!(c.display(), "12");
    tape(&mut c, "DD");
    assert!(c.is_idle());
}

#[test]
fn kp_ac_garde_le_mode() {
    let c = apres("M5+5A");
    assert!(c.is_idle());
    assert_eq!(c.angle_mode(), AngleMode::Degrees);
}

#[test]
fn kp_rappel_historique() {
    let mut c = apres("3*3=A");
    let id = c.history().newest().unwrap().id;
    assert!(c.recall(id));
    tape(&mut c, "+1=");
    assert_eq!(c.display(), "10");
    assert_eq!(c.history().len(), 2);
}

#[test]
fn kp_historique_plus_recent_d_abord() {
    let c = apres("1+1=A2+2=A3+3=");
    let resultats: Vec<&str> = c.history().iter().map(|e| e.result.as_str()).collect();
    assert_eq!(resultats, ["6", "4", "2"]);
}

#[test]
fn kp_longueur_max() {
    let mut c = Calculator::new(Settings {
        max_input_length: 10,
        ..Settings::default()
    });
    tape(&mut c, "12345678901");
    let avant = c.state().clone();
    let n = c.press(&touche('4')).unwrap();
    assert_eq!(n.message, "Max input length reached.");
    assert_eq!(c.state(), &avant);

    // "=" passe malgré tout
    assert!(c.press(&touche('=')).is_none());
    assert_eq!(c.display(), "12345678901");
}

/* ------------------------ Campagne aléatoire ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
}

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

fn touche_aleatoire(rng: &mut Rng) -> InputEvent {
    // chiffres sur-représentés, "=" assez fréquent pour enchaîner les résultats
    const TOUCHES: &str = "0123456789012345678901234.+-*/%^()()==sctSCTrlnpeADDM~";
    let i = rng.pick(TOUCHES.len() as u32 + 2) as usize;
    match TOUCHES.chars().nth(i) {
        Some(ch) => touche(ch),
        // de temps en temps, une touche inconnue
        None if i % 2 == 0 => InputEvent::function("foo("),
        None => InputEvent::operator("&"),
    }
}

fn check_transition(avant: &CalculatorState, ev: &InputEvent, apres: &CalculatorState, effet: &Effect, max: usize) {
    let ctx = || format!("avant={avant:?} touche={ev:?} apres={apres:?}");

    assert!(!apres.display.is_empty(), "écran vide: {}", ctx());
    assert!(
        apres.expression.matches('(').count() >= apres.expression.matches(')').count(),
        "')' en trop: {}",
        ctx()
    );
    // une touche ajoute au plus "*arccos(" après le garde-fou
    assert!(apres.expression.len() <= max + 8, "expression trop longue: {}", ctx());

    match effet {
        Effect::Computed { result, .. } => {
            assert_eq!(&apres.expression, result, "{}", ctx());
            assert_eq!(&apres.display, result, "{}", ctx());
            assert!(apres.last_was_result && apres.overwrite_next, "{}", ctx());
        }
        Effect::Failed(kind) => {
            assert_eq!(apres.display, ERROR_SENTINEL, "{}", ctx());
            assert_ne!(*kind, ErrorKind::InvalidInput, "le clavier a produit un jeton hors grammaire: {}", ctx());
        }
        Effect::Rejected => assert_eq!(apres, avant, "{}", ctx()),
        Effect::None => {}
    }

    if !avant.is_error() && apres.is_error() {
        assert!(matches!(effet, Effect::Failed(_)), "sentinelle sans échec: {}", ctx());
    }
}

#[test]
fn kp_campagne_aleatoire() {
    let start = Instant::now();
    let max_temps = Duration::from_secs(5);

    for (seed, max_len) in [(1u64, 30usize), (2, 100), (3, 30), (0xBEEF, 100), (0xCAFE, 60)] {
        let cfg = Settings {
            max_input_length: max_len,
            ..Settings::default()
        };
        let mut rng = Rng::new(seed);
        let mut s = CalculatorState::default();

        for _ in 0..1_500 {
            let ev = touche_aleatoire(&mut rng);
            let step = apply(&s, &ev, &cfg);
            check_transition(&s, &ev, &step.state, &step.effect, max_len);
            s = step.state;
        }
        budget(start, max_temps);
    }
}

#[test]
fn kp_campagne_deterministe() {
    let cfg = Settings::default();
    let joue = |seed| {
        let mut rng = Rng::new(seed);
        let mut s = CalculatorState::default();
        for _ in 0..300 {
            s = apply(&s, &touche_aleatoire(&mut rng), &cfg).state;
        }
        s
    };
    assert_eq!(joue(11), joue(11));
}
