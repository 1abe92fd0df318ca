// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Disassembler-related functionality
//!
//! See [disassemble] for documentation

use itertools::Itertools;

use super::OpCode;

/// Create a listing of the memory, one instruction or run of data per line
///
/// # Example
///
/// ```
/// use gravity_assist::disasm::disassemble;
/// const EXPECTED_DISASM: &str = r#"
/// ADD 9, 10, 3
/// MUL 3, 11, 0
/// HALT
/// DATA 30, 40, 50
/// "#;
/// let disassembled = disassemble([1, 9, 10, 3, 2, 3, 11, 0, 99, 30, 40, 50]);
/// assert_eq!(disassembled, EXPECTED_DISASM.trim_ascii_start());
/// ```
///
/// # Caveats
///
/// ## Ambiguity
///
/// There's no way to tell whether a given int in memory is meant as an instruction or as data.
/// This function starts at the beginning of `mem_iter`, and treats every opcode it comes across as
/// the start of an instruction, falling back to `DATA` for everything else, including an `ADD` or
/// `MUL` that runs past the end of memory.
///
/// ```
/// use gravity_assist::disasm::disassemble;
/// assert_eq!(disassemble([99, 1, 2, 7]), "HALT\nDATA 1, 2, 7\n");
/// ```
///
/// ## Self-modifying Code
///
/// Because Intcode programs can modify themselves, disassembling them can only show their code as
/// it exists at a specific point in time, and not what an instruction will look like at the time
/// it's executed:
///
/// ```
/// use gravity_assist::{prelude::*, disasm::disassemble};
/// // the ADD stores 99 over the 12345 that follows it
/// let code = [1, 5, 6, 4, 12345, 0, 99];
/// assert_eq!(disassemble(code), "ADD 5, 6, 4\nDATA 12345, 0\nHALT\n");
///
/// let mut interp = Interpreter::new(code);
/// assert_eq!(interp.exec_instruction(), Ok(State::Running));
/// assert_eq!(interp[4], 99);
/// assert_eq!(interp.exec_instruction(), Ok(State::Halted));
/// ```
pub fn disassemble(mem_iter: impl IntoIterator<Item = i64>) -> String {
    let mem: Vec<i64> = mem_iter.into_iter().collect();

    let mut lines: Vec<String> = Vec::new();
    let mut data: Vec<i64> = Vec::new();

    macro_rules! flush_data {
        () => {
            if !data.is_empty() {
                lines.push(format!("DATA {}", data.drain(..).join(", ")));
            }
        };
    }

    let mut i = 0;
    while i < mem.len() {
        match OpCode::try_from(mem[i]) {
            Ok(OpCode::Halt) => {
                flush_data!();
                lines.push(OpCode::Halt.to_string());
                i += 1;
            }
            Ok(opcode) if i + 3 < mem.len() => {
                flush_data!();
                lines.push(format!(
                    "{opcode} {}, {}, {}",
                    mem[i + 1],
                    mem[i + 2],
                    mem[i + 3]
                ));
                i += opcode.width();
            }
            _ => {
                data.push(mem[i]);
                i += 1;
            }
        }
    }
    flush_data!();

    lines.into_iter().map(|line| format!("{line}\n")).collect()
}
