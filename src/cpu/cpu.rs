use std::fmt;

use log::{debug, error, warn};

use crate::{
    bus::{Bus, ROM_BASE},
    byte,
    cpu::{
        flags::Status,
        opcodes::{self, Opcode},
        registers::Registers,
        trace::{TraceEvent, TraceSink},
    },
    error::StepError,
};

pub struct CPU<B: Bus> {
    pub regs: Registers,
    pub bus: B,
    /// Address of the opcode byte of the instruction being executed.
    instruction_address: u16,
    tracer: Option<Box<dyn TraceSink>>,
}

/// Counts from one call to [`CPU::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Steps attempted, successful or not.
    pub steps: usize,
    /// Steps that executed an instruction.
    pub executed: usize,
    /// Non-fatal step errors that were reported and skipped.
    pub reported_errors: usize,
}

/// Register snapshot for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MachineState {
    pub a: i8,
    pub x: i8,
    pub y: i8,
    pub pc: u32,
    pub status: Status,
    pub stack_depth: usize,
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "A: {} X: {} Y: {}", self.a, self.x, self.y)?;
        write!(
            f,
            "PC: ${:04X} P: {} stack: {}",
            self.pc, self.status, self.stack_depth
        )
    }
}

impl<B: Bus> CPU<B> {
    /// Machine with zeroed registers, empty stack and PC at the start of ROM.
    pub fn new(bus: B) -> Self {
        Self {
            regs: Registers::default(),
            bus,
            instruction_address: ROM_BASE,
            tracer: None,
        }
    }

    pub fn with_tracer(mut self, tracer: Box<dyn TraceSink>) -> Self {
        self.tracer = Some(tracer);
        self
    }

    pub fn set_tracer(&mut self, tracer: Option<Box<dyn TraceSink>>) {
        self.tracer = tracer;
    }

    /// Clear registers, flags and stack; PC back to the start of ROM. Memory is untouched.
    pub fn reset(&mut self) {
        self.regs = Registers::default();
        self.instruction_address = ROM_BASE;
    }

    /// Point PC at an absolute ROM address.
    pub fn jump_to(&mut self, address: u16) -> Result<(), StepError> {
        self.set_pc_address(address as u32)
    }

    pub fn state(&self) -> MachineState {
        MachineState {
            a: self.regs.a,
            x: self.regs.x,
            y: self.regs.y,
            pc: self.regs.pc_address(),
            status: self.regs.status,
            stack_depth: self.regs.stack.len(),
        }
    }

    /// Fetch, decode and execute one instruction. Returns the bytes consumed (opcode + operand).
    ///
    /// An unknown opcode leaves PC just past the offending byte, so the next step carries on
    /// with the following byte.
    pub fn step(&mut self) -> Result<usize, StepError> {
        let address = self.pc_address_u16()?;
        self.instruction_address = address;

        let opcode_byte = self.fetch_byte()?;
        let opcode = opcodes::decode(opcode_byte).ok_or(StepError::UnknownOpcode {
            opcode: opcode_byte,
            address,
        })?;

        let operand = self.resolve(opcode.mode)?;
        self.execute(opcode.mnemonic, operand)?;

        if self.tracer.is_some() {
            let event = self.trace_event(address, opcode_byte, opcode);
            if let Some(tracer) = self.tracer.as_mut() {
                tracer.record(&event);
            }
        }

        Ok(1 + opcode.width())
    }

    /// Execute up to `budget` steps. Non-fatal errors are logged and skipped; a fatal one ends
    /// the run and is returned, leaving the machine state as it was at the failure.
    pub fn run(&mut self, budget: usize) -> Result<RunSummary, StepError> {
        let mut summary = RunSummary::default();

        for _ in 0..budget {
            summary.steps += 1;
            match self.step() {
                Ok(_) => summary.executed += 1,
                Err(err) if err.is_fatal() => {
                    error!("{} after {} steps", err, summary.steps);
                    return Err(err);
                }
                Err(err) => {
                    warn!("{}", err);
                    summary.reported_errors += 1;
                }
            }
        }

        debug!(
            "run finished: {} steps, {} executed, {} errors",
            summary.steps, summary.executed, summary.reported_errors
        );
        Ok(summary)
    }

    pub(crate) fn fetch_byte(&mut self) -> Result<u8, StepError> {
        let addr = self.pc_address_u16()?;
        let byte = self.bus.read(addr)?;
        self.regs.pc = self.regs.pc.wrapping_add(1);
        Ok(byte)
    }

    pub(crate) fn fetch_word(&mut self) -> Result<u16, StepError> {
        let lo = self.fetch_byte()?;
        let hi = self.fetch_byte()?;
        Ok(byte::word(lo, hi))
    }

    fn pc_address_u16(&self) -> Result<u16, StepError> {
        let address = self.regs.pc_address();
        u16::try_from(address).map_err(|_| StepError::PcOutOfRom(address))
    }

    /// Move PC to an absolute address, which must lie in ROM.
    pub(crate) fn set_pc_address(&mut self, target: u32) -> Result<(), StepError> {
        if (ROM_BASE as u32..=0xFFFF).contains(&target) {
            self.regs.pc = (target - ROM_BASE as u32) as u16;
            Ok(())
        } else {
            Err(StepError::PcOutOfRom(target))
        }
    }

    pub(crate) fn push(&mut self, value: u8) {
        self.regs.stack.push(value);
    }

    pub(crate) fn pop(&mut self) -> Result<u8, StepError> {
        self.regs.stack.pop().ok_or(StepError::StackUnderflow {
            address: self.instruction_address,
        })
    }

    /// Stack byte `depth` below the top, without removing it.
    pub(crate) fn peek(&self, depth: usize) -> Result<u8, StepError> {
        self.regs.stack.peek_at(depth).ok_or(StepError::StackUnderflow {
            address: self.instruction_address,
        })
    }

    /// Word pushed by `push_word`, its low byte `depth` below the top.
    pub(crate) fn peek_word(&self, depth: usize) -> Result<u16, StepError> {
        let lo = self.peek(depth)?;
        let hi = self.peek(depth + 1)?;
        Ok(byte::word(lo, hi))
    }

    pub(crate) fn push_word(&mut self, value: u16) {
        self.push((value >> 8) as u8);
        self.push(value as u8);
    }

    fn trace_event(&self, address: u16, opcode_byte: u8, opcode: Opcode) -> TraceEvent {
        let raw = (1..=opcode.width()).rev().fold(0u16, |acc, i| {
            let byte = self
                .bus
                .read(address.wrapping_add(i as u16))
                .unwrap_or_default();
            (acc << 8) | byte as u16
        });
        let next = address as u32 + 1 + opcode.width() as u32;

        TraceEvent {
            address,
            opcode: opcode_byte,
            mnemonic: opcode.mnemonic,
            operand: opcode.mode.format_operand(raw, next),
            flags: opcode
                .mnemonic
                .traces_flags()
                .then_some(self.regs.status),
            a: self.regs.a,
            x: self.regs.x,
            y: self.regs.y,
            stack_depth: self.regs.stack.len(),
        }
    }
}
