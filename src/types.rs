//! This module defines the core data structures and types used throughout the Turing Machine
//! simulator, including tape symbols, transitions, execution results, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The character used to represent a blank cell on the tape.
pub const BLANK_SYMBOL: char = '_';
/// Numeric identifier of a state. A state is identified by the length of its unary encoding.
pub type StateId = usize;
/// The state every machine starts in.
pub const START_STATE: StateId = 1;
/// Step ceiling used by the command line front end unless told otherwise.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// A symbol that can be stored in a tape cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Zero,
    One,
    /// Padding used when the tape grows. Stripped from the final output.
    Blank,
}

impl Symbol {
    /// Maps a tape character to its symbol. Returns `None` for characters outside of the
    /// tape alphabet.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Symbol::Zero),
            '1' => Some(Symbol::One),
            BLANK_SYMBOL => Some(Symbol::Blank),
            _ => None,
        }
    }

    /// Returns the character used to display this symbol on the tape.
    pub fn as_char(self) -> char {
        match self {
            Symbol::Zero => '0',
            Symbol::One => '1',
            Symbol::Blank => BLANK_SYMBOL,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Represents the possible directions a Turing Machine head can move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Move the head one position to the left.
    Left,
    /// Move the head one position to the right.
    Right,
}

impl Direction {
    /// The signed distance the head travels.
    pub fn offset(self) -> isize {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Represents a single transition rule for a Turing Machine.
///
/// When the machine is in `state` and reads `read` under the head, it writes `write`,
/// moves in `direction` and continues in `next_state`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub state: StateId,
    pub read: Symbol,
    pub next_state: StateId,
    pub write: Symbol,
    pub direction: Direction,
}

impl Transition {
    /// Returns `true` if this transition applies to the given state and symbol.
    pub fn matches(&self, state: StateId, symbol: Symbol) -> bool {
        self.state == state && self.read == symbol
    }
}

/// An ordered collection of transitions, in the order they appear in the encoded program.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet(Vec<Transition>);

impl RuleSet {
    pub fn new(rules: Vec<Transition>) -> Self {
        Self(rules)
    }

    pub fn rules(&self) -> &[Transition] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Finds the transition for the given state and symbol.
    ///
    /// Rules are scanned in table order and the first match wins, so a later rule with the
    /// same `(state, read)` pair is never selected.
    pub fn find(&self, state: StateId, symbol: Symbol) -> Option<&Transition> {
        self.0.iter().find(|t| t.matches(state, symbol))
    }

    /// Returns every state that has at least one outgoing transition, sorted and deduplicated.
    pub fn states(&self) -> Vec<StateId> {
        let mut states: Vec<StateId> = self.0.iter().map(|t| t.state).collect();
        states.sort_unstable();
        states.dedup();
        states
    }
}

impl From<Vec<Transition>> for RuleSet {
    fn from(rules: Vec<Transition>) -> Self {
        Self(rules)
    }
}

/// Controls how conflicting transitions are treated.
///
/// - `Normal` (default): the first transition for a `(state, symbol)` pair wins and any
///   later duplicates are reported as warnings.
/// - `Strict`: duplicates are rejected before execution.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Normal,
    Strict,
}

/// Execution settings for a machine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Upper bound on the number of executed steps. `None` runs until the machine halts.
    pub max_steps: Option<u64>,
    pub mode: Mode,
    /// Print one line per executed step.
    pub trace: bool,
}

/// Represents the outcome of a Turing Machine execution step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// The machine successfully performed a step and continues execution.
    Continue,
    /// The machine has halted.
    Halt(Halt),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Halt {
    /// No transition matches the current state and symbol.
    Ok,

    Err(TuringMachineError),
}

/// Represents various errors that can occur during Turing Machine operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuringMachineError {
    /// A unary token that does not decode to a symbol or state.
    #[error("Invalid symbol encoding: {0:?}")]
    InvalidSymbolEncoding(String),
    /// A rule segment that does not split into exactly five fields.
    #[error("Malformed rule {segment:?}: expected 5 fields, found {fields}")]
    MalformedRule { segment: String, fields: usize },
    /// A character outside of the binary alphabet was supplied as tape content.
    #[error("Invalid tape content: {symbol:?} at position {position}")]
    InvalidTapeContent { symbol: char, position: usize },
    /// The machine kept running past its configured step ceiling.
    #[error("Step limit of {0} exceeded")]
    StepLimitExceeded(u64),
    /// Indicates an error during the validation of a program or its input.
    #[error("Program validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations.
    #[error("File error: {0}")]
    FileError(String),
}
