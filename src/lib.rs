// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD
#![warn(missing_docs)]

//! Library providing a small add/multiply Intcode interpreter, a solver that searches for the
//! register pair producing a given output, and the rocket-fuel calculations that go with them.
//!
//! The interpreter only understands the three opcodes from [Day 2]: `ADD` (1), `MUL` (2) and
//! `HALT` (99). Every instruction other than `HALT` is four cells wide, and every parameter is an
//! address. All memory access is bounds-checked, and a program that reads or writes outside of
//! its memory, or that contains an opcode the interpreter doesn't know, stops with an
//! [InterpreterError] rather than carrying on.
//!
//! # Example
//!
//! ```rust
//! use gravity_assist::prelude::*;
//! let mut interpreter = Interpreter::new(vec![1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]);
//!
//! assert_eq!(interpreter.run_to_halt().unwrap(), 3500);
//! assert_eq!(interpreter.state(), State::Halted);
//! assert_eq!(interpreter[3], 70);
//! ```
//!
//! Searching for the inputs that produce an output:
//!
//! ```rust
//! use gravity_assist::prelude::*;
//! // mem[0] = mem[noun] * mem[verb]
//! let template = [2, 0, 0, 0, 99, 3, 5, 7, 11];
//! let pair = solve_for_target(&template, 35).unwrap().unwrap();
//! assert_eq!(pair, RegisterPair { noun: 6, verb: 7 });
//! assert_eq!(pair.encode(), 607);
//! ```
//!
//! [Day 2]: https://adventofcode.com/2019/day/2

/// Bounds-checked program memory
mod mmu;

mod internals;

pub mod disasm;
pub mod fuel;
pub mod loader;
pub mod report;
pub mod solver;
pub mod trace;

use std::error::Error;
use std::fmt::{self, Display};
use std::ops::{Index, IndexMut};

pub use mmu::ProgramStore;
pub use solver::{RegisterPair, Solver, solve_for_target};
use trace::Trace;

/// A small module that re-exports items needed when working with the Intcode interpreter
pub mod prelude {
    pub use crate::solver::{RegisterPair, Solver, solve_for_target};
    pub use crate::{
        ExecConfig, Interpreter, InterpreterError, ProgramStore, State, UnknownOpcodePolicy, run,
        run_with, run_with_registers,
    };
}

/// The number of instructions an [Interpreter] executes by default before giving up with
/// [InterpreterError::StepLimitExceeded]
pub const DEFAULT_STEP_LIMIT: u64 = 1 << 20;

/// The state of the intcode system.
///
/// [Running](State::Running) means that there are more instructions to execute.
///
/// [Halted](State::Halted) means that a `HALT` instruction has been executed. Once it's been
/// returned, no more instructions will be executed.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum State {
    /// Execution can continue
    Running,
    /// Execution has halted
    Halted,
}

/// What to do when the instruction pointer lands on an integer that isn't a known opcode
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum UnknownOpcodePolicy {
    /// Stop with [InterpreterError::DecodingFault]
    #[default]
    Fault,
    /// Treat the instruction as a 4-cell no-op and move on to the next one
    Skip,
}

/// Execution settings for an [Interpreter]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct ExecConfig {
    /// Maximum number of instructions to execute, including the final `HALT`. `None` means no
    /// limit.
    pub step_limit: Option<u64>,
    /// How to handle unrecognized opcodes
    pub unknown_opcode: UnknownOpcodePolicy,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            step_limit: Some(DEFAULT_STEP_LIMIT),
            unknown_opcode: UnknownOpcodePolicy::Fault,
        }
    }
}

/// An error occured when executing an intcode program
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InterpreterError {
    /// The program has no memory at all, so there's nothing to execute
    InvalidProgram,
    /// An address outside of the program's memory was read from or written to
    AddressingFault {
        /// The offending address
        address: i64,
        /// The size of the memory at the time
        len: usize,
    },
    /// An unrecognized opcode was encountered
    DecodingFault {
        /// The integer found where an opcode was expected
        opcode: i64,
        /// The address it was found at
        ip: i64,
    },
    /// The result of an `ADD` or `MUL` instruction doesn't fit in an `i64`
    Overflow {
        /// The address of the instruction
        ip: i64,
    },
    /// The program was still running after executing the configured number of instructions
    StepLimitExceeded(u64),
    /// A previous instruction failed, so execution can't continue
    Poisoned,
}

impl Display for InterpreterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterpreterError::InvalidProgram => write!(f, "program is empty"),
            InterpreterError::AddressingFault { address, len } => write!(
                f,
                "address {address} is outside of program memory (size {len})"
            ),
            InterpreterError::DecodingFault { opcode, ip } => {
                write!(f, "encountered unrecognized opcode {opcode} at address {ip}")
            }
            InterpreterError::Overflow { ip } => {
                write!(f, "instruction at address {ip} overflowed")
            }
            InterpreterError::StepLimitExceeded(limit) => {
                write!(f, "program did not halt within {limit} instructions")
            }
            InterpreterError::Poisoned => {
                write!(f, "interpreter is poisoned by an earlier error")
            }
        }
    }
}

impl Error for InterpreterError {}

/// An opcode understood by the [Interpreter]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum OpCode {
    /// Add the values at the first two parameters, storing the sum at the third
    Add = 1,
    /// Multiply the values at the first two parameters, storing the product at the third
    Mul = 2,
    /// Stop execution
    Halt = 99,
}

impl OpCode {
    /// The number of memory cells an instruction with this opcode occupies
    pub const fn width(self) -> usize {
        match self {
            OpCode::Add | OpCode::Mul => 4,
            OpCode::Halt => 1,
        }
    }
}

impl TryFrom<i64> for OpCode {
    type Error = i64;
    fn try_from(i: i64) -> Result<Self, i64> {
        match i {
            1 => Ok(OpCode::Add),
            2 => Ok(OpCode::Mul),
            99 => Ok(OpCode::Halt),
            _ => Err(i),
        }
    }
}

impl Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OpCode::Add => "ADD",
            OpCode::Mul => "MUL",
            OpCode::Halt => "HALT",
        })
    }
}

#[derive(Debug, Clone)]
/// An intcode interpreter, which owns its memory and can optionally [trace](Interpreter::start_trace)
/// the instructions it executes.
pub struct Interpreter {
    index: i64,
    code: ProgramStore,
    config: ExecConfig,
    steps: u64,
    state: State,
    poisoned: bool,
    trace: Option<Trace>,
}

// ignore the trace field
impl PartialEq for Interpreter {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
            && self.code == other.code
            && self.config == other.config
            && self.steps == other.steps
            && self.state == other.state
            && self.poisoned == other.poisoned
    }
}

impl Index<usize> for Interpreter {
    type Output = i64;

    fn index(&self, i: usize) -> &Self::Output {
        self.code.index(i)
    }
}

impl IndexMut<usize> for Interpreter {
    fn index_mut(&mut self, i: usize) -> &mut Self::Output {
        self.code.index_mut(i)
    }
}

impl Interpreter {
    /// Create a new interpreter with the default [ExecConfig]. Collects `code` into the starting
    /// memory state.
    pub fn new(code: impl IntoIterator<Item = i64>) -> Self {
        Self::with_config(code, ExecConfig::default())
    }

    /// Create a new interpreter with the given [ExecConfig]
    pub fn with_config(code: impl IntoIterator<Item = i64>, config: ExecConfig) -> Self {
        Self::from_store(code.into_iter().collect(), config)
    }

    /// Create a new interpreter that executes `store` in place
    pub fn from_store(store: ProgramStore, config: ExecConfig) -> Self {
        Self {
            index: 0,
            code: store,
            config,
            steps: 0,
            state: State::Running,
            poisoned: false,
            trace: None,
        }
    }

    /// Write `pair` into addresses 1 and 2
    pub fn set_registers(&mut self, pair: RegisterPair) -> Result<(), InterpreterError> {
        self.code.set(1, pair.noun)?;
        self.code.set(2, pair.verb)
    }

    /// Manually set a memory location
    ///
    /// ```
    /// use gravity_assist::prelude::*;
    /// let mut interp = Interpreter::new([1, 0, 0, 0, 99]);
    /// interp.mem_override(0, 2).unwrap();
    /// assert_eq!(interp.mem_get(0), Ok(2));
    /// assert_eq!(interp.run_to_halt(), Ok(4));
    /// assert_eq!(
    ///     interp.mem_override(5, 0),
    ///     Err(InterpreterError::AddressingFault { address: 5, len: 5 })
    /// );
    /// ```
    #[doc(alias("poke", "write"))]
    pub fn mem_override(&mut self, address: i64, value: i64) -> Result<(), InterpreterError> {
        self.code.set(address, value)
    }

    /// Get the memory at `address`
    ///
    /// ```
    /// use gravity_assist::prelude::*;
    /// let interp = Interpreter::new([1, 0, 0, 0, 99]);
    /// assert_eq!(interp.mem_get(4), Ok(99));
    /// assert!(interp.mem_get(-1).is_err());
    /// ```
    #[doc(alias = "peek")]
    pub fn mem_get(&self, address: i64) -> Result<i64, InterpreterError> {
        self.code.get(address)
    }

    /// The current state of execution
    pub fn state(&self) -> State {
        self.state
    }

    /// The number of instructions executed so far
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// The address of the next instruction to execute
    pub fn instr_ptr(&self) -> i64 {
        self.index
    }

    /// The settings this interpreter runs with
    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    /// A view of the interpreter's memory
    pub fn memory(&self) -> &ProgramStore {
        &self.code
    }

    /// Consume the interpreter, returning its memory
    pub fn into_memory(self) -> ProgramStore {
        self.code
    }

    /// Execute a single instruction.
    ///
    /// Returns [State::Halted] once a `HALT` instruction has been executed, and keeps returning it
    /// without doing anything afterwards.
    ///
    /// If the instruction fails, the interpreter is poisoned, and every later call returns
    /// [InterpreterError::Poisoned].
    pub fn exec_instruction(&mut self) -> Result<State, InterpreterError> {
        if self.poisoned {
            return Err(InterpreterError::Poisoned);
        }
        if self.state == State::Halted {
            return Ok(State::Halted);
        }
        let result = self.step();
        if result.is_err() {
            self.poisoned = true;
        }
        result
    }

    /// Execute until the program halts, then return the value at address 0.
    ///
    /// On error, it will return an [`InterpreterError`] that reflects the error.
    pub fn run_to_halt(&mut self) -> Result<i64, InterpreterError> {
        while self.exec_instruction()? == State::Running {}
        self.code.get(0)
    }
}

/// Run a copy of `program` to completion with the default [ExecConfig], returning the value left
/// at address 0.
///
/// `program` itself is never modified.
pub fn run(program: &[i64]) -> Result<i64, InterpreterError> {
    run_with(program, &ExecConfig::default())
}

/// Run a copy of `program` to completion with the given [ExecConfig], returning the value left at
/// address 0.
pub fn run_with(program: &[i64], config: &ExecConfig) -> Result<i64, InterpreterError> {
    Interpreter::from_store(ProgramStore::load(program), *config).run_to_halt()
}

/// Run a copy of `program` with `pair` written into addresses 1 and 2, returning the value left
/// at address 0.
pub fn run_with_registers(
    program: &[i64],
    pair: RegisterPair,
    config: &ExecConfig,
) -> Result<i64, InterpreterError> {
    let mut interp = Interpreter::from_store(ProgramStore::load(program), *config);
    interp.set_registers(pair)?;
    interp.run_to_halt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_then_multiply() {
        let program = [1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50];
        let mut interpreter = Interpreter::new(program);
        assert_eq!(interpreter.exec_instruction(), Ok(State::Running));
        assert_eq!(interpreter[3], 70);
        assert_eq!(interpreter.instr_ptr(), 4);
        assert_eq!(interpreter.exec_instruction(), Ok(State::Running));
        assert_eq!(interpreter[0], 3500);
        assert_eq!(interpreter.exec_instruction(), Ok(State::Halted));
        // halting doesn't move the instruction pointer
        assert_eq!(interpreter.instr_ptr(), 8);
        assert_eq!(interpreter.steps(), 3);
        // once halted, nothing else happens
        assert_eq!(interpreter.exec_instruction(), Ok(State::Halted));
        assert_eq!(interpreter.steps(), 3);
    }

    #[test]
    fn run_leaves_program_alone() {
        let program = vec![1, 0, 0, 0, 99];
        assert_eq!(run(&program), Ok(2));
        assert_eq!(program, vec![1, 0, 0, 0, 99]);
    }

    #[test]
    fn empty_program_is_invalid() {
        assert_eq!(run(&[]), Err(InterpreterError::InvalidProgram));
    }

    #[test]
    fn halt_in_last_cell() {
        assert_eq!(run(&[99]), Ok(99));
        assert_eq!(run(&[1, 0, 0, 0, 99]), Ok(2));
    }

    #[test]
    fn running_off_the_end() {
        // no HALT, so the instruction pointer leaves memory after the ADD
        assert_eq!(
            run(&[1, 0, 0, 0]),
            Err(InterpreterError::AddressingFault { address: 4, len: 4 })
        );
    }

    #[test]
    fn truncated_instruction() {
        assert_eq!(
            run(&[1, 0, 0]),
            Err(InterpreterError::AddressingFault { address: 3, len: 3 })
        );
    }

    #[test]
    fn bad_operand_and_destination() {
        assert_eq!(
            run(&[1, 50, 0, 0, 99]),
            Err(InterpreterError::AddressingFault {
                address: 50,
                len: 5
            })
        );
        assert_eq!(
            run(&[2, 0, 0, -3, 99]),
            Err(InterpreterError::AddressingFault {
                address: -3,
                len: 5
            })
        );
    }

    #[test]
    fn unknown_opcode_faults_by_default() {
        assert_eq!(
            run(&[1, 0, 0, 0, 7, 0, 0, 0, 99]),
            Err(InterpreterError::DecodingFault { opcode: 7, ip: 4 })
        );
    }

    #[test]
    fn unknown_opcode_can_be_skipped() {
        let config = ExecConfig {
            unknown_opcode: UnknownOpcodePolicy::Skip,
            ..Default::default()
        };
        let mut interp = Interpreter::with_config([1, 0, 0, 0, 7, 0, 0, 0, 99], config);
        assert_eq!(interp.run_to_halt(), Ok(2));
        assert_eq!(interp.steps(), 3);
    }

    #[test]
    fn overflow_is_reported() {
        let program = [2, 5, 5, 0, 99, i64::MAX];
        assert_eq!(run(&program), Err(InterpreterError::Overflow { ip: 0 }));
    }

    #[test]
    fn step_limit() {
        let program = [1, 0, 0, 0, 1, 0, 0, 0, 99];
        let config = |limit| ExecConfig {
            step_limit: Some(limit),
            ..Default::default()
        };
        assert_eq!(
            run_with(&program, &config(2)),
            Err(InterpreterError::StepLimitExceeded(2))
        );
        // the HALT counts as a step
        assert_eq!(run_with(&program, &config(3)), Ok(4));
        let unlimited = ExecConfig {
            step_limit: None,
            ..Default::default()
        };
        assert_eq!(run_with(&program, &unlimited), Ok(4));
    }

    #[test]
    fn config_is_kept() {
        assert_eq!(Interpreter::new([99]).config(), &ExecConfig::default());
        assert_eq!(
            Interpreter::new([99]).config().step_limit,
            Some(DEFAULT_STEP_LIMIT)
        );
        let config = ExecConfig {
            step_limit: Some(7),
            unknown_opcode: UnknownOpcodePolicy::Skip,
        };
        let interp = Interpreter::with_config([99], config);
        assert_eq!(interp.config(), &config);
        assert_eq!(interp.clone().config().unknown_opcode, UnknownOpcodePolicy::Skip);
    }

    /// Ensure that a failed instruction leaves the interpreter unusable rather than continuing
    /// from a half-executed state
    #[test]
    fn fault_poisons() {
        let mut interp = Interpreter::new([1, 0, 0, 0, 42, 0, 0, 0, 99]);
        assert_eq!(interp.exec_instruction(), Ok(State::Running));
        let old_state = interp.clone();
        assert_eq!(
            interp.exec_instruction(),
            Err(InterpreterError::DecodingFault { opcode: 42, ip: 4 })
        );
        assert_eq!(interp.exec_instruction(), Err(InterpreterError::Poisoned));
        assert_eq!(interp.memory(), old_state.memory());
        assert_ne!(interp, old_state);
    }

    #[test]
    fn registers_are_written_before_running() {
        let pair = RegisterPair { noun: 5, verb: 6 };
        let template = [1, 0, 0, 0, 99, 10, 20];
        assert_eq!(
            run_with_registers(&template, pair, &ExecConfig::default()),
            Ok(30)
        );
        assert_eq!(
            run_with_registers(&[1, 0], pair, &ExecConfig::default()),
            Err(InterpreterError::AddressingFault { address: 2, len: 2 })
        );
    }

    #[test]
    fn opcode_decoding() {
        assert_eq!(OpCode::try_from(1), Ok(OpCode::Add));
        assert_eq!(OpCode::try_from(2), Ok(OpCode::Mul));
        assert_eq!(OpCode::try_from(99), Ok(OpCode::Halt));
        assert_eq!(OpCode::try_from(3), Err(3));
        assert_eq!(OpCode::try_from(1002), Err(1002));
        assert_eq!(OpCode::Add.width(), 4);
        assert_eq!(OpCode::Halt.width(), 1);
    }
}
