//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler `evaluate` sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : une valeur rendue est toujours finie ; tout le reste
//!   est une erreur classée (jamais de panique)

use std::time::{Duration, Instant};

use super::{balance_parens, evaluate, format_result, Outcome};
use crate::calc::AngleMode;

/* ------------------------ RNG déterministe minimal ------------------------ */

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
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
    fn choose<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.pick(items.len() as u32) as usize]
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn mode(rng: &mut Rng) -> AngleMode {
    if rng.coin() {
        AngleMode::Radians
    } else {
        AngleMode::Degrees
    }
}

fn check_outcome(expr: &str, out: &Outcome) {
    match out {
        Outcome::Value(v) => {
            assert!(v.is_finite(), "valeur non finie pour {expr:?}: {v}");
            // le résultat formaté doit être relisible tel quel
            let r = format_result(*v, 12);
            assert!(
                matches!(evaluate(&r, AngleMode::Radians), Outcome::Value(_)),
                "résultat non réinjectable: {r:?} (expr={expr:?})"
            );
        }
        Outcome::Error(e) => {
            assert!(!e.kind().message().is_empty());
        }
        Outcome::Empty => assert!(expr.trim().is_empty(), "Empty sur {expr:?}"),
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

fn gen_num(rng: &mut Rng) -> String {
    match rng.pick(6) {
        0 => "0".to_string(),
        1 => format!("{}", rng.pick(10)),
        2 => format!("{}.{}", rng.pick(100), rng.pick(100)),
        3 => format!("{}", rng.pick(100_000)),
        4 => "PI".to_string(),
        _ => "E".to_string(),
    }
}

fn gen_expr(rng: &mut Rng, depth: usize) -> String {
    if depth == 0 {
        return gen_num(rng);
    }

    const FONCTIONS: &[&str] = &[
        "sin(", "cos(", "tan(", "arcsin(", "arccos(", "arctan(", "sqrt(", "log(", "ln(",
    ];
    const OPS: &[&str] = &["+", "-", "*", "/", "%", "**"];

    match rng.pick(5) {
        0 => gen_num(rng),
        1 => format!(
            "{}{}{}",
            gen_expr(rng, depth - 1),
            rng.choose(OPS),
            gen_expr(rng, depth - 1)
        ),
        2 => format!("({})", gen_expr(rng, depth - 1)),
        3 => format!("-{}", gen_expr(rng, depth - 1)),
        _ => {
            let f = rng.choose(FONCTIONS);
            // parfois non fermée : la fermeture automatique doit suffire
            if rng.coin() {
                format!("{f}{})", gen_expr(rng, depth - 1))
            } else {
                format!("{f}{}", gen_expr(rng, depth - 1))
            }
        }
    }
}

/// Bruit : suites arbitraires de fragments, valides ou non.
fn gen_bruit(rng: &mut Rng, len: usize) -> String {
    const FRAGMENTS: &[&str] = &[
        "1", "9", ".", "e", "e+", "+", "-", "*", "**", "/", "%", "(", ")", ",", "sin(", "arc",
        "PI", "E", "math.", "math.pow(", "foo", "π", " ", "^", "__import__", ";", "=",
    ];
    (0..len).map(|_| rng.choose(FRAGMENTS)).collect()
}

/* ------------------------ Campagnes ------------------------ */

#[test]
fn fuzz_expressions_bien_formees() {
    let start = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(0xC0FFEE);

    for _ in 0..2_000 {
        let expr = gen_expr(&mut rng, 4);
        let m = mode(&mut rng);
        let out = evaluate(&expr, m);
        check_outcome(&expr, &out);
        budget(start, max);
    }
}

#[test]
fn fuzz_bruit_jamais_de_panique() {
    let start = Instant::now();
    let max = Duration::from_secs(3);
    let mut rng = Rng::new(42);

    for _ in 0..3_000 {
        let len = 1 + rng.pick(16) as usize;
        let expr = gen_bruit(&mut rng, len);
        let m = mode(&mut rng);
        let out = evaluate(&expr, m);
        check_outcome(&expr, &out);
        budget(start, max);
    }
}

#[test]
fn fuzz_determinisme() {
    let mut rng = Rng::new(7);
    for _ in 0..300 {
        let expr = gen_expr(&mut rng, 3);
        let m = mode(&mut rng);
        assert_eq!(evaluate(&expr, m), evaluate(&expr, m), "expr={expr:?}");
    }
}

#[test]
fn fuzz_fermeture_idempotente() {
    let mut rng = Rng::new(99);
    for _ in 0..500 {
        let expr = gen_bruit(&mut rng, 12);
        let une = balance_parens(&expr);
        assert_eq!(balance_parens(&une), une, "expr={expr:?}");
        assert!(une.matches('(').count() <= une.matches(')').count());
    }
}

#[test]
fn fuzz_liste_blanche_stricte() {
    // rien en dehors de la grammaire ne doit produire une valeur
    for expr in [
        "__import__(1)",
        "math.system(1)",
        "1;2",
        "x",
        "open(1)",
        "math.pi.real",
        "1=1",
        "math.sin",
    ] {
        let out = evaluate(expr, AngleMode::Radians);
        assert!(matches!(out, Outcome::Error(_)), "expr={expr:?} => {out:?}");
    }
}
