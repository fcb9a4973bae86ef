//! This module defines the `TuringMachine` struct, which simulates a single-tape Turing
//! Machine driven by a decoded transition table. It handles the machine's state, the tape,
//! head movement and execution of transition rules.

use crate::types::{
    Halt, MachineConfig, RuleSet, StateId, Step, Symbol, Transition, TuringMachineError,
    START_STATE,
};
use std::fmt;

/// A snapshot of the machine taken right before a transition is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub state: StateId,
    pub head: usize,
    /// Tape content left of the head.
    pub band_left: String,
    /// Tape content from the head onwards.
    pub band_right: String,
    /// 1-based number of the step being executed.
    pub step: u64,
}

impl fmt::Display for StepRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Current state: {}, Pointer index: {}, Band: {}*{}, Step number: {}",
            self.state, self.head, self.band_left, self.band_right, self.step
        )
    }
}

/// Represents a single-tape Turing Machine.
///
/// The tape grows by one blank cell whenever the head would leave it, on either side.
pub struct TuringMachine {
    rules: RuleSet,
    config: MachineConfig,
    initial_tape: Vec<Symbol>,
    tape: Vec<Symbol>,
    head: usize,
    state: StateId,
    step_count: u64,
    halt: Option<Halt>,
}

impl TuringMachine {
    /// Creates a new `TuringMachine` in the start state with the head on the first cell.
    ///
    /// # Arguments
    ///
    /// * `rules` - The transition table.
    /// * `initial_tape` - The initial tape content, made of `0` and `1` only. An empty
    ///   tape starts as a single blank cell.
    /// * `config` - Execution settings.
    ///
    /// # Returns
    ///
    /// * `Err(TuringMachineError::InvalidTapeContent)` if the tape contains any other character.
    pub fn new(
        rules: RuleSet,
        initial_tape: &str,
        config: MachineConfig,
    ) -> Result<Self, TuringMachineError> {
        let initial_tape = load_tape(initial_tape)?;

        Ok(Self {
            rules,
            config,
            tape: initial_tape.clone(),
            initial_tape,
            head: 0,
            state: START_STATE,
            step_count: 0,
            halt: None,
        })
    }

    /// Executes a single step of the Turing Machine's computation.
    ///
    /// # Returns
    ///
    /// * `Step::Continue` if a transition was applied.
    /// * `Step::Halt(Halt::Ok)` if no transition matches the current state and symbol.
    /// * `Step::Halt(Halt::Err(_))` if the step limit was reached.
    ///
    /// Once halted, the machine stays halted and every further call returns the same result.
    pub fn step(&mut self) -> Step {
        self.advance(&mut |_: &StepRecord| {})
    }

    /// Runs the machine until it halts, printing a trace line per step when `trace` is
    /// enabled in the configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` with the final tape, blank cells removed.
    /// * `Err(TuringMachineError::StepLimitExceeded)` if the step limit was reached first.
    pub fn run(&mut self) -> Result<String, TuringMachineError> {
        let trace = self.config.trace;

        self.run_with(|record| {
            if trace {
                println!("{}", record);
            }
        })
    }

    /// Runs the machine until it halts, handing every step record to `on_step` before the
    /// corresponding transition is applied.
    pub fn run_with<F>(&mut self, mut on_step: F) -> Result<String, TuringMachineError>
    where
        F: FnMut(&StepRecord),
    {
        loop {
            match self.advance(&mut on_step) {
                Step::Continue => continue,
                Step::Halt(Halt::Ok) => {
                    tracing::info!(
                        state = self.state,
                        steps = self.step_count,
                        "machine halted"
                    );
                    return Ok(self.output());
                }
                Step::Halt(Halt::Err(e)) => return Err(e),
            }
        }
    }

    fn advance(&mut self, on_step: &mut dyn FnMut(&StepRecord)) -> Step {
        if let Some(halt) = &self.halt {
            return Step::Halt(halt.clone());
        }

        let Some(transition) = self.transition().copied() else {
            self.halt = Some(Halt::Ok);
            return Step::Halt(Halt::Ok);
        };

        if let Some(max_steps) = self.config.max_steps {
            if self.step_count >= max_steps {
                tracing::warn!(max_steps, state = self.state, "step limit reached");
                let halt = Halt::Err(TuringMachineError::StepLimitExceeded(max_steps));
                self.halt = Some(halt.clone());
                return Step::Halt(halt);
            }
        }

        self.step_count += 1;
        on_step(&self.record());
        tracing::trace!(
            step = self.step_count,
            state = self.state,
            head = self.head,
            "applying transition"
        );

        self.apply(&transition);

        Step::Continue
    }

    /// Writes, moves the head and switches state. The tape is extended by one blank cell
    /// when the head leaves it.
    fn apply(&mut self, transition: &Transition) {
        self.tape[self.head] = transition.write;

        match self.head.checked_add_signed(transition.direction.offset()) {
            Some(head) => {
                self.head = head;
                if self.head >= self.tape.len() {
                    self.tape.push(Symbol::Blank);
                }
            }
            None => {
                // Extend tape to the left
                self.tape.insert(0, Symbol::Blank);
                self.head = 0;
            }
        }

        self.state = transition.next_state;
    }

    fn record(&self) -> StepRecord {
        let (left, right) = self.tape.split_at(self.head);

        StepRecord {
            state: self.state,
            head: self.head,
            band_left: render(left),
            band_right: render(right),
            step: self.step_count,
        }
    }

    /// Finds the transition for the current state and the symbol under the head.
    pub fn transition(&self) -> Option<&Transition> {
        self.rules.find(self.state, self.symbol())
    }

    /// Returns the symbol under the head.
    pub fn symbol(&self) -> Symbol {
        self.tape.get(self.head).copied().unwrap_or(Symbol::Blank)
    }

    /// Checks if the machine has halted or would halt on the next step.
    pub fn is_halted(&self) -> bool {
        self.halt.is_some() || self.transition().is_none()
    }

    /// Returns the tape with every blank cell removed.
    pub fn output(&self) -> String {
        self.tape
            .iter()
            .filter(|&&symbol| symbol != Symbol::Blank)
            .map(|symbol| symbol.as_char())
            .collect()
    }

    /// Resets the machine to its initial configuration.
    pub fn reset(&mut self) {
        self.tape = self.initial_tape.clone();
        self.head = 0;
        self.state = START_STATE;
        self.step_count = 0;
        self.halt = None;
    }

    pub fn state(&self) -> StateId {
        self.state
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn tape(&self) -> &[Symbol] {
        &self.tape
    }

    /// Returns the tape including blank cells.
    pub fn tape_string(&self) -> String {
        render(&self.tape)
    }

    /// Returns the total number of steps executed.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }
}

/// Runs `rules` against `initial_tape` until the machine halts and returns the final tape
/// without blank cells. With `trace` set, one line per step is printed to stdout.
pub fn run(rules: &RuleSet, initial_tape: &str, trace: bool) -> Result<String, TuringMachineError> {
    let config = MachineConfig {
        trace,
        ..MachineConfig::default()
    };

    TuringMachine::new(rules.clone(), initial_tape, config)?.run()
}

fn load_tape(content: &str) -> Result<Vec<Symbol>, TuringMachineError> {
    let tape = content
        .chars()
        .enumerate()
        .map(|(position, symbol)| match symbol {
            '0' => Ok(Symbol::Zero),
            '1' => Ok(Symbol::One),
            _ => Err(TuringMachineError::InvalidTapeContent { symbol, position }),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if tape.is_empty() {
        return Ok(vec![Symbol::Blank]);
    }

    Ok(tape)
}

fn render(cells: &[Symbol]) -> String {
    cells.iter().map(|symbol| symbol.as_char()).collect()
}
