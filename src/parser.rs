//! This module provides the parser for binary encoded Turing Machine programs.
//!
//! A program is a string over `{0, 1}`. Transitions are separated by `11`, and the five
//! fields of a transition by a single `1`:
//!
//! ```text
//! state 1 read 1 next_state 1 write 1 direction 11 state 1 ...
//! ```
//!
//! The split is purely literal: the input is first cut on every `11`, then each
//! non-empty segment is cut on every `1`.

use crate::{
    analyzer::analyze,
    codec::{decode_direction, decode_state, decode_symbol},
    types::{Mode, RuleSet, Transition, TuringMachineError},
};

const RULE_SEPARATOR: &str = "11";
const FIELD_SEPARATOR: char = '1';

/// Parses the given binary program into a `RuleSet`.
///
/// Surrounding whitespace is ignored. Empty segments produced by leading, trailing or
/// repeated separators are skipped. Parsing is all-or-nothing: the first invalid segment
/// aborts the whole parse.
///
/// # Returns
///
/// * `Ok(RuleSet)` with the transitions in source order.
/// * `Err(TuringMachineError::MalformedRule)` if a segment does not have exactly five fields.
/// * `Err(TuringMachineError::InvalidSymbolEncoding)` if a field cannot be decoded.
pub fn parse(input: &str) -> Result<RuleSet, TuringMachineError> {
    let rules = input
        .trim()
        .split(RULE_SEPARATOR)
        .filter(|segment| !segment.is_empty())
        .map(parse_transition)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(rules = rules.len(), "parsed transition table");

    Ok(RuleSet::new(rules))
}

/// Parses the program and runs the static checks for the given mode.
///
/// In `Mode::Strict` a program with conflicting transitions is rejected.
pub fn parse_with_mode(input: &str, mode: Mode) -> Result<RuleSet, TuringMachineError> {
    let rules = parse(input)?;
    analyze(&rules, mode)?;

    Ok(rules)
}

/// Parses a single rule segment: `state 1 read 1 next_state 1 write 1 direction`.
fn parse_transition(segment: &str) -> Result<Transition, TuringMachineError> {
    let fields: Vec<&str> = segment.split(FIELD_SEPARATOR).collect();

    let [state, read, next_state, write, direction] = fields[..] else {
        return Err(TuringMachineError::MalformedRule {
            segment: segment.to_string(),
            fields: fields.len(),
        });
    };

    Ok(Transition {
        state: decode_state(state)?,
        read: decode_symbol(read)?,
        next_state: decode_state(next_state)?,
        write: decode_symbol(write)?,
        direction: decode_direction(direction),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Symbol};

    #[test]
    fn test_parse_single_rule() {
        let rules = parse("01010100100").unwrap();

        assert_eq!(
            rules.rules(),
            &[Transition {
                state: 1,
                read: Symbol::Zero,
                next_state: 1,
                write: Symbol::One,
                direction: Direction::Right,
            }]
        );
    }

    #[test]
    fn test_parse_preserves_order() {
        // 1: 0 -> 1, R, 1 | 1: 1 -> 0, R, 1
        let rules = parse("010101001001101001010100").unwrap();

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[0].read, Symbol::Zero);
        assert_eq!(rules.rules()[1].read, Symbol::One);
        assert_eq!(rules.rules()[1].write, Symbol::Zero);
    }

    #[test]
    fn test_parse_multi_state_program() {
        // 2: _ -> 1, L, 3
        let rules = parse("001000100010010").unwrap();
        let rule = rules.rules()[0];

        assert_eq!(rule.state, 2);
        assert_eq!(rule.read, Symbol::Blank);
        assert_eq!(rule.next_state, 3);
        assert_eq!(rule.write, Symbol::One);
        assert_eq!(rule.direction, Direction::Left);
    }

    #[test]
    fn test_parse_skips_empty_segments() {
        assert!(parse("11").unwrap().is_empty());
        assert!(parse("").unwrap().is_empty());
        assert!(parse("1111").unwrap().is_empty());

        let rules = parse("110101010010011").unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let rules = parse("  01010100100\n").unwrap();
        assert_eq!(rules.len(), 1);
    }

    #[test]
    fn test_parse_wrong_field_count() {
        let result = parse("0101010");
        assert_eq!(
            result,
            Err(TuringMachineError::MalformedRule {
                segment: "0101010".to_string(),
                fields: 4,
            })
        );

        let result = parse("01010100100101");
        assert!(matches!(
            result,
            Err(TuringMachineError::MalformedRule { fields: 7, .. })
        ));
    }

    #[test]
    fn test_parse_odd_separator_run() {
        // "111" splits into "" and "1", the latter having two empty fields.
        assert!(matches!(
            parse("111"),
            Err(TuringMachineError::MalformedRule { fields: 2, .. })
        ));
    }

    #[test]
    fn test_parse_invalid_symbol_aborts_whole_parse() {
        // The second rule writes a run of four zeros.
        let result = parse("01010100100110100101000010");
        assert_eq!(
            result,
            Err(TuringMachineError::InvalidSymbolEncoding("0000".to_string()))
        );
    }

    #[test]
    fn test_parse_empty_state_field() {
        // A segment that starts with a field separator has an empty state.
        let result = parse("0101010010111010100100");
        assert_eq!(
            result,
            Err(TuringMachineError::InvalidSymbolEncoding(String::new()))
        );
    }

    #[test]
    fn test_parse_non_binary_input() {
        assert!(matches!(
            parse("01010102100"),
            Err(TuringMachineError::InvalidSymbolEncoding(_))
        ));
    }

    #[test]
    fn test_parse_with_mode_strict_rejects_duplicates() {
        let program = "010101001001101010010100";

        assert_eq!(parse_with_mode(program, Mode::Normal).unwrap().len(), 2);
        assert!(matches!(
            parse_with_mode(program, Mode::Strict),
            Err(TuringMachineError::ValidationError(_))
        ));
    }
}
