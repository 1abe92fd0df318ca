// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Recording of executed instructions
//!
//! Every instruction an [Interpreter] executes is emitted as a `TRACE`-level [tracing] event. To
//! keep a record that can be inspected afterwards, start a [Trace] with
//! [Interpreter::start_trace].
use std::fmt::{self, Debug, Display};

use super::{Interpreter, OpCode};

/// A resolved parameter: the pointer found in the instruction, and the value it resolved to (or,
/// for a destination, the value stored there)
type Resolved = (i64, i64);

#[derive(Clone, Copy, PartialEq, Eq)]
pub(crate) enum TracedOp {
    Add(Resolved, Resolved, Resolved),
    Mul(Resolved, Resolved, Resolved),
    Halt,
    /// An unrecognized opcode that was skipped over
    Skipped,
}

impl TracedOp {
    pub(crate) fn binary(opcode: OpCode, a: Resolved, b: Resolved, dest: Resolved) -> Self {
        match opcode {
            OpCode::Add => Self::Add(a, b, dest),
            OpCode::Mul => Self::Mul(a, b, dest),
            OpCode::Halt => Self::Halt,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
/// An opaque type containing information about what instruction was executed, which can be queried
/// with its various methods, or converted into a [String] using its [Display] impl.
pub struct TracedInstr {
    op: TracedOp,
    op_int: i64,
    instr_ptr: i64,
    step: u64,
}

impl TracedInstr {
    /// Return the instruction pointer's position when the traced instruction was executed
    pub fn instr_ptr(&self) -> i64 {
        self.instr_ptr
    }

    /// Return the actual integer of the traced instruction
    pub fn op_int(&self) -> i64 {
        self.op_int
    }

    /// Return how many instructions had been executed before this one
    pub fn step(&self) -> u64 {
        self.step
    }

    /// Return the opcode of the traced instruction, or [`None`] if it was an unrecognized opcode
    /// that was skipped
    pub fn op_code(&self) -> Option<OpCode> {
        match self.op {
            TracedOp::Add(..) => Some(OpCode::Add),
            TracedOp::Mul(..) => Some(OpCode::Mul),
            TracedOp::Halt => Some(OpCode::Halt),
            TracedOp::Skipped => None,
        }
    }

    /// If the instruction stored a value, return that value
    pub fn stored_val(&self) -> Option<i64> {
        match self.op {
            TracedOp::Add(_, _, (_, v)) | TracedOp::Mul(_, _, (_, v)) => Some(v),
            TracedOp::Halt | TracedOp::Skipped => None,
        }
    }

    /// If the instruction stored a value, return the address it was stored at
    pub fn dest(&self) -> Option<i64> {
        match self.op {
            TracedOp::Add(_, _, (d, _)) | TracedOp::Mul(_, _, (d, _)) => Some(d),
            TracedOp::Halt | TracedOp::Skipped => None,
        }
    }
}

impl Interpreter {
    /// Begin a [Trace] of executed instructions. If a trace is already running, this replaces that
    /// trace and returns in a [`Some`], otherwise, it returns [`None`].
    ///
    /// # Example
    /// ```
    ///# use gravity_assist::prelude::*;
    /// let mut interp = Interpreter::new([1, 0, 0, 0, 99]);
    /// assert!(interp.start_trace().is_none());
    /// interp.run_to_halt().unwrap();
    /// let trace = interp.end_trace().unwrap();
    /// assert_eq!(trace.0.len(), 2);
    /// assert_eq!(trace.0[0].stored_val(), Some(2));
    /// ```
    pub fn start_trace(&mut self) -> Option<Trace> {
        self.trace.replace(Trace::new())
    }

    /// Stop tracing executed instructions into a [Trace]. If no trace was active, returns [`None`]
    ///
    /// see [Interpreter::start_trace]
    pub fn end_trace(&mut self) -> Option<Trace> {
        self.trace.take()
    }

    /// Get a view of the current trace
    pub fn show_trace(&self) -> Option<&Trace> {
        self.trace.as_ref()
    }

    /// Log an executed instruction, and add it to the active trace if there is one
    pub(crate) fn record(&mut self, op_int: i64, op: TracedOp) {
        let instr = TracedInstr {
            op,
            op_int,
            instr_ptr: self.index,
            step: self.steps,
        };
        tracing::trace!("{instr}");
        if let Some(trace) = self.trace.as_mut() {
            trace.0.push(instr);
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
/// A log of instructions that an [Interpreter] has executed since a call to
/// [Interpreter::start_trace]
///
/// see [Interpreter::start_trace]
pub struct Trace(pub Vec<TracedInstr>);

impl Trace {
    pub(crate) fn new() -> Self {
        Self(Vec::new())
    }
}

impl Debug for TracedOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        macro_rules! arg {
            ($arg: ident) => {
                format_args!("{} => {}", $arg.0, $arg.1)
            };
        }
        macro_rules! variant {
            ($name: literal, ($($arg: ident),*)) => {
                f.debug_tuple($name)
                $(.field(&arg!($arg) ))*
                .finish()
            }
        }
        match self {
            Self::Add(a0, a1, a2) => variant!("Add", (a0, a1, a2)),
            Self::Mul(a0, a1, a2) => variant!("Mul", (a0, a1, a2)),
            Self::Halt => write!(f, "Halt"),
            Self::Skipped => write!(f, "Skipped"),
        }
    }
}

impl Debug for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TracedInstr")
            .field("op", &self.op)
            .field("op_int", &self.op_int)
            .field("instr_ptr", &self.instr_ptr)
            .field("step", &self.step)
            .finish()
    }
}

impl Display for TracedInstr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ran instruction at {:0>4}: op int {: <5} | ",
            self.instr_ptr, self.op_int
        )?;

        let (name, (pa, va), (pb, vb), (dest, stored)) = match self.op {
            TracedOp::Add(a, b, d) => (OpCode::Add, a, b, d),
            TracedOp::Mul(a, b, d) => (OpCode::Mul, a, b, d),
            TracedOp::Halt => return write!(f, "[HALT]"),
            TracedOp::Skipped => return write!(f, "[skipped unrecognized opcode]"),
        };
        write!(
            f,
            "[{name} {pa} (resolves to {va}), {pb} (resolves to {vb}), {dest} (stored {stored})]"
        )
    }
}
