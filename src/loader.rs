//! This module provides the `ProgramLoader` struct, responsible for turning user supplied
//! data into machine inputs: binary programs from files or strings, decimal numbers that
//! stand for a binary program, initial tapes and JSON configuration files.

use crate::parser::{parse, parse_with_mode};
use crate::types::{MachineConfig, Mode, RuleSet, TuringMachineError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// `ProgramLoader` is a utility struct for loading programs, tapes and configuration.
pub struct ProgramLoader;

impl ProgramLoader {
    /// Loads a program from the specified file path.
    ///
    /// The file may hold either the binary program itself or a decimal number whose
    /// binary representation is the program.
    ///
    /// # Returns
    ///
    /// * `Ok(RuleSet)` if the file is successfully read and parsed.
    /// * `Err(TuringMachineError::FileError)` if the file cannot be read.
    /// * `Err(TuringMachineError::ValidationError)` if the content is neither binary nor decimal.
    /// * Any parse error if the binary content is not a valid program.
    pub fn load_program(path: &Path) -> Result<RuleSet, TuringMachineError> {
        parse(&Self::read_program(path)?)
    }

    /// Loads a program from the specified file path and runs the static checks for `mode`.
    ///
    /// In `Mode::Strict` a program with conflicting transitions is rejected.
    pub fn load_program_with_mode(
        path: &Path,
        mode: Mode,
    ) -> Result<RuleSet, TuringMachineError> {
        parse_with_mode(&Self::read_program(path)?, mode)
    }

    /// Reads a program file and returns its binary form.
    fn read_program(path: &Path) -> Result<String, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;
        let data = Self::normalize_program(&content)?;
        tracing::info!(path = %path.display(), "data read from file: {}", data);

        Ok(data)
    }

    /// Loads a program from the provided string content, binary or decimal.
    pub fn load_program_from_string(content: &str) -> Result<RuleSet, TuringMachineError> {
        parse(&Self::normalize_program(content)?)
    }

    /// Loads a program from string content, binary or decimal, and runs the static checks
    /// for `mode`.
    pub fn load_program_from_string_with_mode(
        content: &str,
        mode: Mode,
    ) -> Result<RuleSet, TuringMachineError> {
        parse_with_mode(&Self::normalize_program(content)?, mode)
    }

    /// Returns the binary form of a program. Binary content is returned as is, anything
    /// else is read as a decimal number.
    ///
    /// Content made only of `0` and `1` is always taken as binary, so `"10"` is the
    /// program `10`, not the number ten.
    pub fn normalize_program(content: &str) -> Result<String, TuringMachineError> {
        let content = content.trim();

        if is_binary(content) {
            return Ok(content.to_string());
        }

        Self::from_decimal(content).map_err(|_| {
            TuringMachineError::ValidationError(format!(
                "Program data is neither binary nor decimal: {:?}",
                content
            ))
        })
    }

    /// Converts a decimal number of any length into its binary representation without
    /// leading zeros.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` with the binary digits, `"0"` for zero.
    /// * `Err(TuringMachineError::ValidationError)` if the input is empty or contains
    ///   anything but ASCII digits.
    pub fn from_decimal(input: &str) -> Result<String, TuringMachineError> {
        let input = input.trim();

        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(TuringMachineError::ValidationError(format!(
                "Invalid decimal data: {:?}",
                input
            )));
        }

        Ok(decimal_to_binary(input))
    }

    /// Validates an initial tape. Only `0` and `1` are accepted, surrounding whitespace is
    /// ignored.
    pub fn read_binary(input: &str) -> Result<String, TuringMachineError> {
        let input = input.trim();

        match input.char_indices().find(|&(_, c)| c != '0' && c != '1') {
            Some((position, symbol)) => {
                Err(TuringMachineError::InvalidTapeContent { symbol, position })
            }
            None => Ok(input.to_string()),
        }
    }

    /// Loads a `MachineConfig` from a JSON file. Missing fields take their default values.
    pub fn load_config(path: &Path) -> Result<MachineConfig, TuringMachineError> {
        Self::load_config_over(path, MachineConfig::default())
    }

    /// Loads a JSON configuration file on top of `base`. Only the fields present in the
    /// file replace the values of `base`. A `max_steps` of `0` removes the step limit.
    pub fn load_config_over(
        path: &Path,
        base: MachineConfig,
    ) -> Result<MachineConfig, TuringMachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            TuringMachineError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        let overlay: ConfigOverlay = serde_json::from_str(&content).map_err(|e| {
            TuringMachineError::ValidationError(format!(
                "Invalid configuration in {}: {}",
                path.display(),
                e
            ))
        })?;

        Ok(overlay.apply(base))
    }
}

/// The fields of a configuration file. Absent fields leave the base value untouched.
#[derive(Debug, Deserialize)]
struct ConfigOverlay {
    max_steps: Option<u64>,
    mode: Option<Mode>,
    trace: Option<bool>,
}

impl ConfigOverlay {
    fn apply(self, mut config: MachineConfig) -> MachineConfig {
        if let Some(max_steps) = self.max_steps {
            config.max_steps = (max_steps > 0).then_some(max_steps);
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(trace) = self.trace {
            config.trace = trace;
        }

        config
    }
}

fn is_binary(content: &str) -> bool {
    content.chars().all(|c| c == '0' || c == '1')
}

/// Schoolbook division by two over the decimal digits, collecting remainders.
fn decimal_to_binary(input: &str) -> String {
    let mut digits: Vec<u32> = input
        .trim_start_matches('0')
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();
    let mut bits = Vec::new();

    while !digits.is_empty() {
        let mut quotient = Vec::with_capacity(digits.len());
        let mut remainder = 0;

        for digit in digits {
            let current = remainder * 10 + digit;
            if !quotient.is_empty() || current >= 2 {
                quotient.push(current / 2);
            }
            remainder = current % 2;
        }

        bits.push(if remainder == 1 { '1' } else { '0' });
        digits = quotient;
    }

    if bits.is_empty() {
        return "0".to_string();
    }

    bits.iter().rev().collect()
}
