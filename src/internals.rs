// SPDX-FileCopyrightText: 2024 - 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

use super::*;
use trace::TracedOp;

impl Interpreter {
    /// Decode and execute the instruction at the instruction pointer, without the poisoning and
    /// halted-state bookkeeping done by [Interpreter::exec_instruction]
    pub(crate) fn step(&mut self) -> Result<State, InterpreterError> {
        if self.code.is_empty() {
            return Err(InterpreterError::InvalidProgram);
        }
        match self.config.step_limit {
            Some(limit) if self.steps >= limit => {
                return Err(InterpreterError::StepLimitExceeded(limit));
            }
            _ => (),
        }

        let op_int = self.code.get(self.index)?;
        let outcome = match OpCode::try_from(op_int) {
            Ok(OpCode::Add) => self.op3(OpCode::Add, i64::checked_add)?,
            Ok(OpCode::Mul) => self.op3(OpCode::Mul, i64::checked_mul)?,
            Ok(OpCode::Halt) => {
                self.record(op_int, TracedOp::Halt);
                self.state = State::Halted;
                State::Halted
            }
            Err(opcode) => match self.config.unknown_opcode {
                UnknownOpcodePolicy::Fault => {
                    return Err(InterpreterError::DecodingFault {
                        opcode,
                        ip: self.index,
                    });
                }
                UnknownOpcodePolicy::Skip => {
                    self.record(op_int, TracedOp::Skipped);
                    self.index += 4;
                    State::Running
                }
            },
        };
        self.steps += 1;
        Ok(outcome)
    }

    /// common logic of the 2 instructions that take 3 parameters
    ///
    /// The first two parameters are pointers to the operands, and the third is the address the
    /// result is stored at. Nothing is written unless every address involved is valid.
    pub(crate) fn op3(
        &mut self,
        opcode: OpCode,
        operation: impl Fn(i64, i64) -> Option<i64>,
    ) -> Result<State, InterpreterError> {
        let ip = self.index;
        let a = self.code.deref(ip + 1)?;
        let b = self.code.deref(ip + 2)?;
        // the store below may overwrite the parameters themselves
        let (pa, pb) = (self.code.get(ip + 1)?, self.code.get(ip + 2)?);
        let dest = self.code.get(ip + 3)?;
        let val = operation(a, b).ok_or(InterpreterError::Overflow { ip })?;
        self.code.set(dest, val)?;
        let traced = TracedOp::binary(opcode, (pa, a), (pb, b), (dest, val));
        self.record(opcode as i64, traced);
        self.index += 4;
        Ok(State::Running)
    }
}
