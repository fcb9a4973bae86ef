//! This module provides encoding functionality for converting a transition table back into
//! the binary program format read by the parser.

use crate::codec::{encode_direction, encode_state, encode_symbol};
use crate::types::{RuleSet, Transition};

/// Encodes a transition table into a binary program.
///
/// Format: `rule 11 rule 11 ...`
/// - rule: `state 1 read 1 next_state 1 write 1 direction`, every field a run of `0`s.
///
/// # Arguments
///
/// * `rules` - The transitions to encode, in table order.
///
/// # Returns
///
/// * `String` - The encoded program. An empty table encodes to an empty string.
pub fn encode(rules: &RuleSet) -> String {
    rules
        .rules()
        .iter()
        .map(encode_transition)
        .collect::<Vec<_>>()
        .join("11")
}

/// Encodes a single transition.
pub fn encode_transition(transition: &Transition) -> String {
    [
        encode_state(transition.state).as_str(),
        encode_symbol(transition.read),
        encode_state(transition.next_state).as_str(),
        encode_symbol(transition.write),
        encode_direction(transition.direction),
    ]
    .join("1")
}
