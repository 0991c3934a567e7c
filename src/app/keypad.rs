// src/app/keypad.rs
//
// Disposition du pavé (5 colonnes) + correspondance clavier physique.
// Chaque touche porte directement la valeur CANONIQUE qu’elle envoie.

use crate::calc::{EventKind, InputEvent};

#[derive(Clone, Copy, Debug)]
pub struct Key {
    pub label: &'static str,
    pub value: &'static str,
    pub kind: EventKind,
    pub hint: &'static str,
}

impl Key {
    const fn new(label: &'static str, value: &'static str, kind: EventKind, hint: &'static str) -> Self {
        Self {
            label,
            value,
            kind,
            hint,
        }
    }

    pub fn event(&self) -> InputEvent {
        InputEvent::new(self.kind, self.value)
    }
}

use EventKind::*;

pub const LAYOUT: [[Key; 5]; 7] = [
    [
        Key::new("AC", "AC", Control, "All Clear"),
        Key::new("+/-", "+/-", Sign, "Toggle Sign"),
        Key::new("Rad/Deg", "mode", Mode, "Toggle Radian/Degree Mode"),
        Key::new("(", "(", Parenthesis, "Open Parenthesis"),
        Key::new(")", ")", Parenthesis, "Close Parenthesis"),
    ],
    [
        Key::new("sin", "sin(", Function, "Sine"),
        Key::new("7", "7", Digit, ""),
        Key::new("8", "8", Digit, ""),
        Key::new("9", "9", Digit, ""),
        Key::new("÷", "/", Operator, "Divide"),
    ],
    [
        Key::new("cos", "cos(", Function, "Cosine"),
        Key::new("4", "4", Digit, ""),
        Key::new("5", "5", Digit, ""),
        Key::new("6", "6", Digit, ""),
        Key::new("×", "*", Operator, "Multiply"),
    ],
    [
        Key::new("tan", "tan(", Function, "Tangent"),
        Key::new("1", "1", Digit, ""),
        Key::new("2", "2", Digit, ""),
        Key::new("3", "3", Digit, ""),
        Key::new("−", "-", Operator, "Subtract"),
    ],
    [
        Key::new("x^y", "**", Operator, "Exponent"),
        Key::new("0", "0", Digit, ""),
        Key::new(".", ".", Decimal, "Decimal Point"),
        Key::new("+", "+", Operator, "Add"),
        Key::new("DEL", "DEL", Control, "Delete last token"),
    ],
    [
        Key::new("√x", "sqrt(", Function, "Square Root"),
        Key::new("π", "PI", Constant, "Pi"),
        Key::new("e", "E", Constant, "Euler's number"),
        Key::new("mod", "%", Operator, "Modulo"),
        Key::new("=", "=", Equals, "Equals"),
    ],
    [
        Key::new("log", "log(", Function, "Log base 10"),
        Key::new("ln", "ln(", Function, "Natural Log"),
        Key::new("asin", "arcsin(", Function, "Arcsine"),
        Key::new("acos", "arccos(", Function, "Arccosine"),
        Key::new("atan", "arctan(", Function, "Arctangent"),
    ],
];

/// Caractère tapé au clavier physique -> touche.
pub fn event_for_char(c: char) -> Option<InputEvent> {
    let ev = match c {
        '0'..='9' => InputEvent::digit(c),
        '.' | ',' => InputEvent::decimal(),
        '+' | '-' | '*' | '/' | '%' => InputEvent::operator(&c.to_string()),
        '^' => InputEvent::operator("**"),
        '(' => InputEvent::open_paren(),
        ')' => InputEvent::close_paren(),
        '=' => InputEvent::equals(),
        _ => return None,
    };
    Some(ev)
}
