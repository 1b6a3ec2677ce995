//! Common regex patterns for grocery receipt lines.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Unit, packaging and quantity noise: periods, digits and catalog abbreviations
    // as whole words. Removed in a single left-to-right pass.
    pub static ref UNIT_NOISE: Regex = Regex::new(
        r"\.|[0-9]|\b(?:Cmq|Bot|Ltr|Kg|Ml|Frasco|Botella|Gr|Cc|L|Pouch|Tetrabrik|Cm|Uni|Kgm|Grm|K|Bsa|Bolsa|Bol|Pou|Fra|Pote|Caja|Est|m|Pak|Pot|Cja|Fwp|Unidad|Unidades|Paquete|Paq|Lat|Tab|Dsp|Bli|Lata|Saquitos|Pet|Sobre|Sob|GR)\b"
    ).unwrap();

    // Discount annotations such as "(10,50)" trailing a product name.
    pub static ref PARENTHETICAL: Regex = Regex::new(
        r"\([^)]*\)"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Longest leading decimal literal, as read by a lenient float parser.
    pub static ref LEADING_NUMBER: Regex = Regex::new(
        r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?"
    ).unwrap();
}
