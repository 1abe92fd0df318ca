// SPDX-FileCopyrightText: 2026 Eli Array Minkoff
//
// SPDX-License-Identifier: 0BSD

//! Compute the fuel and Intcode puzzle answers, printing them and writing them to a file

use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use gravity_assist::disasm::disassemble;
use gravity_assist::fuel::{fuel_requirement, total_fuel_requirement};
use gravity_assist::loader::load_integers;
use gravity_assist::prelude::*;
use gravity_assist::report::Report;
use gravity_assist::trace::Trace;
use gravity_assist::DEFAULT_STEP_LIMIT;
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(env!("CARGO_CRATE_NAME"), '-', env!("CARGO_PKG_VERSION"));

#[derive(PartialEq, Clone, Copy, ValueEnum)]
enum OpcodePolicy {
    /// stop with an error
    Fault,
    /// treat the instruction as a 4-cell no-op
    Skip,
}

impl From<OpcodePolicy> for UnknownOpcodePolicy {
    fn from(policy: OpcodePolicy) -> Self {
        match policy {
            OpcodePolicy::Fault => UnknownOpcodePolicy::Fault,
            OpcodePolicy::Skip => UnknownOpcodePolicy::Skip,
        }
    }
}

#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = VERSION)]
#[command(about = "Fuel and Intcode puzzle answers", long_about = None)]
struct Args {
    #[arg(long, default_value = "inputs/01-mass_input.txt")]
    #[arg(help = "File containing module masses")]
    masses: PathBuf,
    #[arg(long, default_value = "inputs/02-program_integers.txt")]
    #[arg(help = "File containing the Intcode program")]
    program: PathBuf,
    #[arg(short, long, default_value = "output.txt")]
    #[arg(help = "File to write the answers to, in addition to stdout")]
    output: PathBuf,
    #[arg(long, default_value_t = 12)]
    #[arg(help = "Noun for the fixed-input run")]
    noun: i64,
    #[arg(long, default_value_t = 2)]
    #[arg(help = "Verb for the fixed-input run")]
    verb: i64,
    #[arg(long, default_value_t = 19_690_720)]
    #[arg(help = "Output to search for a register pair for")]
    target: i64,
    #[arg(long, default_value_t = DEFAULT_STEP_LIMIT)]
    #[arg(help = "Maximum instructions per run")]
    step_limit: u64,
    #[arg(long, conflicts_with = "step_limit")]
    #[arg(help = "Don't limit the instructions per run")]
    no_step_limit: bool,
    #[arg(long, value_enum, default_value = "fault")]
    #[arg(help = "What to do with unrecognized opcodes")]
    unknown_opcode: OpcodePolicy,
    #[arg(long)]
    #[arg(help = "Search register pairs on a single thread")]
    sequential: bool,
    #[arg(long)]
    #[arg(help = "Log each instruction of the fixed-input run")]
    trace: bool,
    #[arg(long)]
    #[arg(help = "Print a listing of the program to stderr")]
    disassemble: bool,
}

impl Args {
    fn exec_config(&self) -> ExecConfig {
        ExecConfig {
            step_limit: (!self.no_step_limit).then_some(self.step_limit),
            unknown_opcode: self.unknown_opcode.into(),
        }
    }
}

fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// Run the program with the fixed register pair, optionally logging every instruction
fn fixed_input_run(
    program: &[i64],
    pair: RegisterPair,
    config: ExecConfig,
    trace: bool,
) -> Result<i64, InterpreterError> {
    let mut interp = Interpreter::from_store(ProgramStore::load(program), config);
    if trace {
        interp.start_trace();
    }
    interp.set_registers(pair)?;
    let result = interp.run_to_halt();
    if let Some(Trace(trace)) = interp.end_trace() {
        for instr in trace {
            tracing::info!("{instr}");
        }
    }
    result
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    setup_tracing();
    let args = Args::parse();
    let config = args.exec_config();

    let masses = load_integers(&args.masses)?;
    let program = load_integers(&args.program)?;

    if args.disassemble {
        eprint!("{}", disassemble(program.iter().copied()));
    }

    let mut report = Report::new();
    report.push(1, 1, fuel_requirement(&masses));
    report.push(1, 2, total_fuel_requirement(&masses));

    let pair = RegisterPair::new(args.noun, args.verb);
    report.push(2, 1, fixed_input_run(&program, pair, config, args.trace));

    let solved = Solver::new(&program)
        .config(config)
        .parallel(!args.sequential)
        .solve(args.target)
        .map_err(|e| e.to_string())
        .and_then(|found| {
            found
                .map(RegisterPair::encode)
                .ok_or_else(|| format!("no register pair produces {}", args.target))
        });
    report.push(2, 2, solved);

    report.emit(&args.output)?;

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
