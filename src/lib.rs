//! This crate provides the core logic for a simulator of Turing Machines whose transition
//! table is itself written in binary. It includes modules for decoding the unary encoded
//! transitions, executing them on a growing tape, analyzing tables for conflicts, loading
//! programs from files or decimal numbers and a collection of sample programs.

pub mod analyzer;
pub mod codec;
pub mod encoder;
pub mod loader;
pub mod machine;
pub mod parser;
pub mod programs;
pub mod types;

/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports the token decoders from the codec module.
pub use codec::{decode_direction, decode_symbol};
/// Re-exports the encoding function from the encoder module.
pub use encoder::encode;
/// Re-exports the `ProgramLoader` struct from the loader module.
pub use loader::ProgramLoader;
/// Re-exports the `TuringMachine` struct and the `run` shortcut from the machine module.
pub use machine::{run, StepRecord, TuringMachine};
/// Re-exports the parsing functions from the parser module.
pub use parser::{parse, parse_with_mode};
/// Re-exports `ProgramInfo`, `ProgramManager`, and `PROGRAMS` from the programs module.
pub use programs::{ProgramInfo, ProgramManager, PROGRAMS};
/// Re-exports various types related to machine definition and execution from the types module.
pub use types::{
    Direction, Halt, MachineConfig, Mode, RuleSet, StateId, Step, Symbol, Transition,
    TuringMachineError, BLANK_SYMBOL, DEFAULT_MAX_STEPS, START_STATE,
};
