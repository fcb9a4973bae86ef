//! This module provides static checks over a decoded transition table. The machine itself
//! never needs them: it always takes the first matching transition. They exist to surface
//! tables that are probably not what their author meant, such as conflicting transitions or
//! states that can never be entered.

use crate::types::{Mode, RuleSet, StateId, Transition, TuringMachineError, START_STATE};
use std::collections::HashSet;

/// Represents the problems that can be found during the analysis of a transition table.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Transitions that can never fire because an earlier transition has the same
    /// state and read symbol.
    ShadowedTransitions(Vec<Transition>),
    /// States with transitions that cannot be reached from the start state.
    UnreachableStates(Vec<StateId>),
}

impl From<AnalysisError> for TuringMachineError {
    /// Converts an `AnalysisError` into a `TuringMachineError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::ShadowedTransitions(transitions) => {
                let pairs = transitions
                    .iter()
                    .map(|t| format!("({}, {})", t.state, t.read))
                    .collect::<Vec<_>>()
                    .join(", ");
                TuringMachineError::ValidationError(format!(
                    "Conflicting transitions for state/symbol pairs: {}",
                    pairs
                ))
            }
            AnalysisError::UnreachableStates(states) => TuringMachineError::ValidationError(
                format!("Unreachable states detected: {:?}", states),
            ),
        }
    }
}

/// Analyzes a transition table.
///
/// Shadowed transitions are reported as warnings in `Mode::Normal` and rejected in
/// `Mode::Strict`. Unreachable states are only logged.
///
/// # Returns
///
/// * `Ok(Vec<Transition>)` with the shadowed transitions, in table order.
/// * `Err(TuringMachineError::ValidationError)` in strict mode if any transition is shadowed.
pub fn analyze(rules: &RuleSet, mode: Mode) -> Result<Vec<Transition>, TuringMachineError> {
    let shadowed = shadowed_transitions(rules);

    if !shadowed.is_empty() {
        if mode == Mode::Strict {
            return Err(AnalysisError::ShadowedTransitions(shadowed).into());
        }

        for transition in &shadowed {
            tracing::warn!(
                state = transition.state,
                read = %transition.read,
                "transition is shadowed by an earlier one and will never fire"
            );
        }
    }

    let unreachable = unreachable_states(rules);
    if !unreachable.is_empty() {
        let error = TuringMachineError::from(AnalysisError::UnreachableStates(unreachable));
        tracing::debug!("{}", error);
    }

    if rules.rules().iter().all(|t| t.state != START_STATE) {
        tracing::debug!("no transition leaves the start state, the machine halts immediately");
    }

    Ok(shadowed)
}

/// Collects every transition whose `(state, read)` pair was already claimed by an earlier
/// transition.
fn shadowed_transitions(rules: &RuleSet) -> Vec<Transition> {
    let mut seen = HashSet::new();

    rules
        .rules()
        .iter()
        .filter(|t| !seen.insert((t.state, t.read)))
        .copied()
        .collect()
}

/// Returns the states that have transitions but cannot be reached from `START_STATE`.
///
/// Performs a depth-first traversal over `next_state` edges.
pub fn unreachable_states(rules: &RuleSet) -> Vec<StateId> {
    let mut visited = HashSet::new();
    let mut stack = vec![START_STATE];

    while let Some(state) = stack.pop() {
        if !visited.insert(state) {
            continue;
        }

        for transition in rules.rules().iter().filter(|t| t.state == state) {
            if !visited.contains(&transition.next_state) {
                stack.push(transition.next_state);
            }
        }
    }

    // `states()` is already sorted.
    rules
        .states()
        .into_iter()
        .filter(|state| !visited.contains(state))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, Symbol};

    fn transition(state: StateId, read: Symbol, next_state: StateId) -> Transition {
        Transition {
            state,
            read,
            next_state,
            write: read,
            direction: Direction::Right,
        }
    }

    #[test]
    fn test_valid_table() {
        let rules = RuleSet::new(vec![
            transition(1, Symbol::Zero, 1),
            transition(1, Symbol::One, 2),
            transition(2, Symbol::Blank, 3),
        ]);

        assert_eq!(analyze(&rules, Mode::Strict), Ok(Vec::new()));
        assert!(unreachable_states(&rules).is_empty());
    }

    #[test]
    fn test_shadowed_transitions_normal_mode() {
        let first = transition(1, Symbol::Zero, 1);
        let shadowed = transition(1, Symbol::Zero, 2);
        let rules = RuleSet::new(vec![first, transition(1, Symbol::One, 1), shadowed]);

        assert_eq!(analyze(&rules, Mode::Normal), Ok(vec![shadowed]));
    }

    #[test]
    fn test_shadowed_transitions_strict_mode() {
        let rules = RuleSet::new(vec![
            transition(2, Symbol::Blank, 1),
            transition(2, Symbol::Blank, 2),
        ]);

        match analyze(&rules, Mode::Strict) {
            Err(TuringMachineError::ValidationError(msg)) => {
                assert!(msg.contains("(2, _)"));
            }
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_unreachable_states() {
        let rules = RuleSet::new(vec![
            transition(1, Symbol::Zero, 2),
            transition(2, Symbol::Zero, 1),
            transition(4, Symbol::One, 3),
            transition(3, Symbol::One, 4),
        ]);

        assert_eq!(unreachable_states(&rules), vec![3, 4]);
        // Unreachable states are informational only.
        assert!(analyze(&rules, Mode::Strict).is_ok());
    }

    #[test]
    fn test_empty_table() {
        let rules = RuleSet::default();

        assert_eq!(analyze(&rules, Mode::Strict), Ok(Vec::new()));
        assert!(unreachable_states(&rules).is_empty());
    }

    #[test]
    fn test_analysis_error_conversion() {
        let error = AnalysisError::UnreachableStates(vec![5]);
        let tm_error: TuringMachineError = error.into();

        match tm_error {
            TuringMachineError::ValidationError(msg) => {
                assert!(msg.contains("Unreachable states detected: [5]"));
            }
            _ => panic!("Expected ValidationError"),
        }
    }
}
