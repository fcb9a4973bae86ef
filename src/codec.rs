//! Decoding of the unary tokens that make up a transition in the binary program format.
//!
//! Each field of a transition is a run of `0` characters. Symbols are encoded by the run
//! length (`0` → Zero, `00` → One, `000` → Blank), states by the run length itself and
//! directions by a single `0` for left, anything else for right.

use crate::types::{Direction, StateId, Symbol, TuringMachineError};

const UNARY_MARK: char = '0';

/// Decodes a symbol token.
///
/// # Returns
///
/// * `Ok(Symbol)` for runs of one, two or three `0`s.
/// * `Err(TuringMachineError::InvalidSymbolEncoding)` for any other token.
pub fn decode_symbol(token: &str) -> Result<Symbol, TuringMachineError> {
    match unary_len(token)? {
        1 => Ok(Symbol::Zero),
        2 => Ok(Symbol::One),
        3 => Ok(Symbol::Blank),
        _ => Err(invalid(token)),
    }
}

/// Decodes a direction token. Only `"0"` means left; every other token, including an empty
/// one, moves right.
pub fn decode_direction(token: &str) -> Direction {
    if token == "0" {
        Direction::Left
    } else {
        Direction::Right
    }
}

/// Decodes a state token into its identifier, the length of the run.
pub fn decode_state(token: &str) -> Result<StateId, TuringMachineError> {
    match unary_len(token)? {
        0 => Err(invalid(token)),
        n => Ok(n),
    }
}

pub fn encode_symbol(symbol: Symbol) -> &'static str {
    match symbol {
        Symbol::Zero => "0",
        Symbol::One => "00",
        Symbol::Blank => "000",
    }
}

pub fn encode_direction(direction: Direction) -> &'static str {
    match direction {
        Direction::Left => "0",
        Direction::Right => "00",
    }
}

pub fn encode_state(state: StateId) -> String {
    UNARY_MARK.to_string().repeat(state)
}

/// Length of a token made only of `0`s.
fn unary_len(token: &str) -> Result<usize, TuringMachineError> {
    if token.chars().all(|c| c == UNARY_MARK) {
        Ok(token.len())
    } else {
        Err(invalid(token))
    }
}

fn invalid(token: &str) -> TuringMachineError {
    TuringMachineError::InvalidSymbolEncoding(token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_symbol_valid_lengths() {
        assert_eq!(decode_symbol("0"), Ok(Symbol::Zero));
        assert_eq!(decode_symbol("00"), Ok(Symbol::One));
        assert_eq!(decode_symbol("000"), Ok(Symbol::Blank));
    }

    #[test]
    fn test_decode_symbol_invalid_lengths() {
        for token in ["", "0000", "00000"] {
            assert_eq!(
                decode_symbol(token),
                Err(TuringMachineError::InvalidSymbolEncoding(token.to_string()))
            );
        }
    }

    #[test]
    fn test_decode_symbol_rejects_foreign_characters() {
        assert!(matches!(
            decode_symbol("01"),
            Err(TuringMachineError::InvalidSymbolEncoding(token)) if token == "01"
        ));
        assert!(decode_symbol("x").is_err());
    }

    #[test]
    fn test_decode_direction_catch_all() {
        assert_eq!(decode_direction("0"), Direction::Left);
        for token in ["1", "00", "", "x", "000"] {
            assert_eq!(decode_direction(token), Direction::Right, "token {token:?}");
        }
    }

    #[test]
    fn test_decode_state() {
        assert_eq!(decode_state("0"), Ok(1));
        assert_eq!(decode_state("00000"), Ok(5));
        assert!(decode_state("").is_err());
        assert!(decode_state("0a").is_err());
    }

    #[test]
    fn test_encode_matches_decode() {
        for symbol in [Symbol::Zero, Symbol::One, Symbol::Blank] {
            assert_eq!(decode_symbol(encode_symbol(symbol)), Ok(symbol));
        }
        for direction in [Direction::Left, Direction::Right] {
            assert_eq!(decode_direction(encode_direction(direction)), direction);
        }
        assert_eq!(decode_state(&encode_state(7)), Ok(7));
    }
}
