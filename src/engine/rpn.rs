// src/engine/rpn.rs
//
// Shunting-yard -> RPN -> valeur
// Objectif:
// - Convertir une suite de Tok en RPN (postfix)
// - Puis dépiler la RPN en f64 (pas d’AST : on ne fait que calculer)
//
// Règles:
// - Moins unaire : '-' quand on n’attend PAS une valeur => opérateur préfixe Neg.
//   Il lie plus fort que * / % mais moins fort que ** : -2**2 = -(2**2).
// - Plus unaire : ignoré.
// - Multiplication implicite : valeur suivie de '(' / fonction / constante => '*'.
// - Fonctions : sortent après leur parenthèse fermante, avec leur nombre d’arguments.

use super::error::EvalError;
use super::tokens::{arite, Tok};

/// Élément de RPN.
#[derive(Clone, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Neg,
    Call(&'static str, usize),
}

/// Élément de la pile d’opérateurs.
#[derive(Clone, Debug)]
enum Op {
    Bin(Rpn),
    Neg,
    LPar,
    // fonction en attente de sa '(' puis de ses arguments
    Func(&'static str),
}

fn precedence(op: &Rpn) -> u8 {
    match op {
        Rpn::Add | Rpn::Sub => 1,
        Rpn::Mul | Rpn::Div | Rpn::Rem => 2,
        Rpn::Neg => 3,
        Rpn::Pow => 4,
        _ => 0,
    }
}

fn is_right_associative(op: &Rpn) -> bool {
    matches!(op, Rpn::Pow)
}

fn binaire(t: &Tok) -> Option<Rpn> {
    match t {
        Tok::Plus => Some(Rpn::Add),
        Tok::Minus => Some(Rpn::Sub),
        Tok::Star => Some(Rpn::Mul),
        Tok::Slash => Some(Rpn::Div),
        Tok::Percent => Some(Rpn::Rem),
        Tok::Pow => Some(Rpn::Pow),
        _ => None,
    }
}

/// Convertit une suite de jetons en RPN.
///
/// Exemple:
///   tokens: [Func("sin"), LPar, Const(π), Slash, Num(2), RPar]
///   rpn:    [Num(π), Num(2), Div, Call("sin", 1)]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Rpn>, EvalError> {
    let mut out: Vec<Rpn> = Vec::with_capacity(tokens.len());
    let mut ops: Vec<Op> = Vec::new();

    // Une entrée par '(' ouverte : Some(nb_virgules) si la '(' appartient à un appel.
    let mut appels: Vec<Option<usize>> = Vec::new();

    // “valeur” = un atome ou une expression fermée.
    let mut prev_was_value = false;
    // Une fonction vient d’être lue : seule '(' est acceptable.
    let mut attend_lpar = false;

    for tok in tokens {
        if attend_lpar && !matches!(tok, Tok::LPar) {
            return Err(EvalError::syntax("fonction sans parenthèse"));
        }

        // multiplication implicite : 2(3), 2math.pi, (1)math.sqrt(4)
        let ouvre_valeur = matches!(tok, Tok::LPar | Tok::Func(_) | Tok::Const(_));
        if prev_was_value && ouvre_valeur {
            pousse_binaire(&mut out, &mut ops, Rpn::Mul);
            prev_was_value = false;
        }

        match tok {
            Tok::Num(v) | Tok::Const(v) => {
                if prev_was_value {
                    return Err(EvalError::syntax("deux valeurs consécutives"));
                }
                out.push(Rpn::Num(*v));
                prev_was_value = true;
            }

            Tok::Func(nom) => {
                ops.push(Op::Func(*nom));
                attend_lpar = true;
            }

            Tok::LPar => {
                let appel = attend_lpar;
                attend_lpar = false;
                appels.push(appel.then_some(0));
                ops.push(Op::LPar);
                prev_was_value = false;
            }

            Tok::Comma => {
                if !prev_was_value {
                    return Err(EvalError::syntax("argument vide"));
                }
                vide_jusqu_a_lpar(&mut out, &mut ops)?;
                match appels.last_mut() {
                    Some(Some(virgules)) => *virgules += 1,
                    _ => return Err(EvalError::syntax("virgule hors d’un appel")),
                }
                prev_was_value = false;
            }

            Tok::RPar => {
                if !prev_was_value {
                    return Err(EvalError::syntax("parenthèse vide ou opérande manquant"));
                }
                vide_jusqu_a_lpar(&mut out, &mut ops)?;
                ops.pop(); // la '('

                let appel = appels
                    .pop()
                    .ok_or_else(|| EvalError::syntax("parenthèse fermante orpheline"))?;
                if let Some(virgules) = appel {
                    match ops.pop() {
                        Some(Op::Func(nom)) => out.push(Rpn::Call(nom, virgules + 1)),
                        _ => return Err(EvalError::syntax("appel de fonction incohérent")),
                    }
                }

                prev_was_value = true;
            }

            Tok::Minus | Tok::Plus if !prev_was_value => {
                // unaire : '+' ne fait rien, '-' devient Neg (préfixe, rien à dépiler)
                if matches!(tok, Tok::Minus) {
                    ops.push(Op::Neg);
                }
            }

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Percent | Tok::Pow => {
                if !prev_was_value {
                    return Err(EvalError::syntax("opérateur sans opérande gauche"));
                }
                if let Some(op) = binaire(tok) {
                    pousse_binaire(&mut out, &mut ops, op);
                }
                prev_was_value = false;
            }
        }
    }

    if attend_lpar {
        return Err(EvalError::syntax("fonction sans parenthèse"));
    }
    if !prev_was_value {
        return Err(EvalError::syntax("expression incomplète"));
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        match op {
            Op::Bin(b) => out.push(b),
            Op::Neg => out.push(Rpn::Neg),
            Op::LPar | Op::Func(_) => return Err(EvalError::syntax("parenthèses non fermées")),
        }
    }

    Ok(out)
}

/// Dépile tant que la précédence/associativité exige de sortir l’opérateur du haut.
fn pousse_binaire(out: &mut Vec<Rpn>, ops: &mut Vec<Op>, op: Rpn) {
    let p_tok = precedence(&op);
    while let Some(top) = ops.last() {
        let p_top = match top {
            Op::Bin(b) => precedence(b),
            Op::Neg => precedence(&Rpn::Neg),
            Op::LPar | Op::Func(_) => break,
        };

        let doit_pop = if is_right_associative(&op) {
            p_top > p_tok
        } else {
            p_top >= p_tok
        };
        if !doit_pop {
            break;
        }

        match ops.pop() {
            Some(Op::Bin(b)) => out.push(b),
            Some(Op::Neg) => out.push(Rpn::Neg),
            _ => {}
        }
    }
    ops.push(Op::Bin(op));
}

/// Dépile jusqu’à la '(' courante (exclue).
fn vide_jusqu_a_lpar(out: &mut Vec<Rpn>, ops: &mut Vec<Op>) -> Result<(), EvalError> {
    loop {
        match ops.last() {
            Some(Op::LPar) => return Ok(()),
            Some(Op::Bin(_)) | Some(Op::Neg) => match ops.pop() {
                Some(Op::Bin(b)) => out.push(b),
                Some(Op::Neg) => out.push(Rpn::Neg),
                _ => {}
            },
            Some(Op::Func(_)) | None => {
                return Err(EvalError::syntax("parenthèse fermante orpheline"));
            }
        }
    }
}

/// Calcule la valeur d’une RPN.
///
/// Le résultat peut être NaN / infini : la classification est faite par eval.rs.
pub fn eval_rpn(rpn: &[Rpn]) -> Result<f64, EvalError> {
    let mut st: Vec<f64> = Vec::with_capacity(rpn.len());
    let invalide = || EvalError::syntax("expression invalide");

    for item in rpn {
        match item {
            Rpn::Num(v) => st.push(*v),

            Rpn::Neg => {
                let x = st.pop().ok_or_else(invalide)?;
                st.push(-x);
            }

            Rpn::Add | Rpn::Sub | Rpn::Mul | Rpn::Div | Rpn::Rem | Rpn::Pow => {
                let b = st.pop().ok_or_else(invalide)?;
                let a = st.pop().ok_or_else(invalide)?;
                let v = match item {
                    Rpn::Add => a + b,
                    Rpn::Sub => a - b,
                    Rpn::Mul => a * b,
                    Rpn::Div => a / b,
                    Rpn::Rem => a % b,
                    _ => a.powf(b),
                };
                st.push(v);
            }

            Rpn::Call(nom, n) => {
                let attendu = arite(nom).ok_or_else(invalide)?;
                if *n != attendu {
                    return Err(EvalError::syntax(format!(
                        "{nom} attend {attendu} argument(s), reçu {n}"
                    )));
                }
                if st.len() < *n {
                    return Err(invalide());
                }
                let args = st.split_off(st.len() - n);
                st.push(applique(nom, &args)?);
            }
        }
    }

    if st.len() != 1 {
        return Err(invalide());
    }
    st.pop().ok_or_else(invalide)
}

fn applique(nom: &str, args: &[f64]) -> Result<f64, EvalError> {
    let v = match (nom, args) {
        ("sqrt", [x]) => x.sqrt(),
        ("log10", [x]) => x.log10(),
        ("ln", [x]) => x.ln(),
        ("sin", [x]) => x.sin(),
        ("cos", [x]) => x.cos(),
        ("tan", [x]) => x.tan(),
        ("asin", [x]) => x.asin(),
        ("acos", [x]) => x.acos(),
        ("atan", [x]) => x.atan(),
        ("to_radians", [x]) => x.to_radians(),
        ("to_degrees", [x]) => x.to_degrees(),
        ("abs", [x]) => x.abs(),
        ("exp", [x]) => x.exp(),
        ("pow", [a, b]) => a.powf(*b),
        ("min", [a, b]) => a.min(*b),
        ("max", [a, b]) => a.max(*b),
        _ => return Err(EvalError::syntax(format!("appel invalide: {nom}"))),
    };
    Ok(v)
}
