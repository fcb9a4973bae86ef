use crate::parser::parse;
use crate::types::{RuleSet, TuringMachineError};

// Default embedded programs: (name, description, binary program)
const PROGRAM_TEXTS: [(&str, &str, &str); 3] = [
    (
        "bit-invert",
        "Flips every bit of the input",
        include_str!("../programs/bit-invert.tm"),
    ),
    (
        "binary-increment",
        "Adds one to a binary number, most significant bit first",
        include_str!("../programs/binary-increment.tm"),
    ),
    (
        "erase",
        "Overwrites the whole input with blanks",
        include_str!("../programs/erase.tm"),
    ),
];

lazy_static::lazy_static! {
    pub static ref PROGRAMS: Vec<Program> = PROGRAM_TEXTS
        .iter()
        .filter_map(|&(name, description, code)| match parse(code) {
            Ok(rules) => Some(Program {
                name,
                description,
                code: code.trim(),
                rules,
            }),
            Err(e) => {
                tracing::error!(program = name, "failed to parse embedded program: {}", e);
                None
            }
        })
        .collect();
}

/// An embedded sample program.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: &'static str,
    pub description: &'static str,
    /// The binary encoded transition table.
    pub code: &'static str,
    pub rules: RuleSet,
}

pub struct ProgramManager;

impl ProgramManager {
    /// Get the number of available programs
    pub fn get_program_count() -> usize {
        PROGRAMS.len()
    }

    /// Get a program by its index
    pub fn get_program_by_index(index: usize) -> Result<Program, TuringMachineError> {
        PROGRAMS.get(index).cloned().ok_or_else(|| {
            TuringMachineError::ValidationError(format!("Program index {} out of range", index))
        })
    }

    /// Get a program by its name
    pub fn get_program_by_name(name: &str) -> Result<Program, TuringMachineError> {
        PROGRAMS
            .iter()
            .find(|program| program.name == name)
            .cloned()
            .ok_or_else(|| {
                TuringMachineError::ValidationError(format!("Program '{}' not found", name))
            })
    }

    /// List all program names
    pub fn list_program_names() -> Vec<&'static str> {
        PROGRAMS.iter().map(|program| program.name).collect()
    }

    /// Get information about a program by its index
    pub fn get_program_info(index: usize) -> Result<ProgramInfo, TuringMachineError> {
        let program = Self::get_program_by_index(index)?;

        Ok(ProgramInfo {
            index,
            name: program.name,
            description: program.description,
            state_count: program.rules.states().len(),
            transition_count: program.rules.len(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ProgramInfo {
    pub index: usize,
    pub name: &'static str,
    pub description: &'static str,
    pub state_count: usize,
    pub transition_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::{run, TuringMachine};
    use crate::types::{MachineConfig, Mode};
    use crate::{analyze, encode};

    #[test]
    fn test_all_programs_are_valid() {
        assert_eq!(ProgramManager::get_program_count(), PROGRAM_TEXTS.len());

        for program in PROGRAMS.iter() {
            assert!(
                analyze(&program.rules, Mode::Strict).is_ok(),
                "Program '{}' is invalid",
                program.name
            );
            assert_eq!(encode(&program.rules), program.code);
        }
    }

    #[test]
    fn test_bit_invert() {
        let program = ProgramManager::get_program_by_name("bit-invert").unwrap();

        assert_eq!(run(&program.rules, "0110", false), Ok("1001".to_string()));
        assert_eq!(run(&program.rules, "", false), Ok(String::new()));
    }

    #[test]
    fn test_binary_increment() {
        let program = ProgramManager::get_program_by_name("binary-increment").unwrap();

        for (input, expected) in [("1011", "1100"), ("111", "1000"), ("0", "1"), ("", "1")] {
            assert_eq!(
                run(&program.rules, input, false),
                Ok(expected.to_string()),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn test_binary_increment_trace() {
        let program = ProgramManager::get_program_by_name("binary-increment").unwrap();
        let mut machine =
            TuringMachine::new(program.rules, "111", MachineConfig::default()).unwrap();
        let mut records = Vec::new();

        machine
            .run_with(|record| records.push(record.to_string()))
            .unwrap();

        assert_eq!(machine.step_count(), 8);
        assert_eq!(
            records.last().map(String::as_str),
            Some("Current state: 2, Pointer index: 0, Band: *_000_, Step number: 8")
        );
    }

    #[test]
    fn test_erase() {
        let program = ProgramManager::get_program_by_name("erase").unwrap();

        assert_eq!(run(&program.rules, "101", false), Ok(String::new()));
    }

    #[test]
    fn test_program_manager_get_program_by_index() {
        let program = ProgramManager::get_program_by_index(0);
        assert!(program.is_ok());

        let result = ProgramManager::get_program_by_index(999);
        assert!(result.is_err());
    }

    #[test]
    fn test_program_manager_get_program_by_name() {
        let result = ProgramManager::get_program_by_name("Nonexistent");
        assert!(result.is_err());
    }

    #[test]
    fn test_program_manager_list_program_names() {
        let names = ProgramManager::list_program_names();
        assert_eq!(names, vec!["bit-invert", "binary-increment", "erase"]);
    }

    #[test]
    fn test_program_manager_get_program_info() {
        let info = ProgramManager::get_program_info(1).unwrap();

        assert_eq!(info.index, 1);
        assert_eq!(info.name, "binary-increment");
        assert_eq!(info.state_count, 2);
        assert_eq!(info.transition_count, 6);

        let result = ProgramManager::get_program_info(999);
        assert!(result.is_err());
    }
}
