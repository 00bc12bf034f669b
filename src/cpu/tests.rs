use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    bus::{Bus, MemoryImage, ROM_SIZE},
    cpu::{
        cpu::CPU,
        flags::Status,
        opcodes::Mnemonic,
        trace::{TraceEvent, TraceSink},
    },
    error::{MemoryError, StepError},
};

/// CPU with `program` at $8000 and zeroed RAM.
fn new_cpu(program: &[u8]) -> CPU<MemoryImage> {
    CPU::new(MemoryImage::new(program))
}

/// CPU whose ROM has `program` at $8000 and extra bytes placed at absolute ROM addresses.
fn new_cpu_with_rom(program: &[u8], extra: &[(u16, u8)]) -> CPU<MemoryImage> {
    let mut rom = vec![0xEA; ROM_SIZE];
    rom[..program.len()].copy_from_slice(program);
    for &(addr, value) in extra {
        rom[(addr - 0x8000) as usize] = value;
    }
    CPU::new(MemoryImage::new(&rom))
}

fn run_steps(cpu: &mut CPU<MemoryImage>, n: usize) {
    for _ in 0..n {
        cpu.step().unwrap();
    }
}

#[test]
fn lda_immediate_loads_value() {
    let mut cpu = new_cpu(&[0xA9, 0x42]); // LDA #$42
    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.regs.a, 0x42);
    assert_eq!(cpu.state().pc, 0x8002);
}

#[test]
fn lda_sets_zero_flag() {
    let mut cpu = new_cpu(&[0xA9, 0x00]);
    cpu.step().unwrap();
    assert!(cpu.regs.status.contains(Status::ZERO));
    assert!(!cpu.regs.status.contains(Status::NEGATIVE));
}

#[test]
fn lda_sets_negative_flag() {
    let mut cpu = new_cpu(&[0xA9, 0x80]);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.a, -128);
    assert!(cpu.regs.status.contains(Status::NEGATIVE));
}

#[test]
fn lda_indexed_modes_read_effective_address() {
    let mut cpu = new_cpu(&[
        0xA2, 0x05, // LDX #$05
        0xB5, 0xFE, // LDA $FE,X -> $03
        0xBD, 0x00, 0x02, // LDA $0200,X -> $0205
    ]);
    cpu.bus.write(0x0003, 0x11).unwrap();
    cpu.bus.write(0x0205, 0x22).unwrap();

    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.a, 0x11);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.a, 0x22);
}

#[test]
fn indexed_indirect_reads_pointer_from_zero_page() {
    let mut cpu = new_cpu(&[
        0xA2, 0x04, // LDX #$04
        0xA1, 0x20, // LDA ($20,X)
    ]);
    cpu.bus.write(0x0024, 0x34).unwrap();
    cpu.bus.write(0x0025, 0x12).unwrap();
    cpu.bus.write(0x1234, 0x77).unwrap();

    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.a, 0x77);
}

#[test]
fn indirect_indexed_adds_y_after_dereference() {
    let mut cpu = new_cpu(&[
        0xA0, 0x10, // LDY #$10
        0xB1, 0xFF, // LDA ($FF),Y, pointer high byte wraps to $00
    ]);
    cpu.bus.write(0x00FF, 0x00).unwrap();
    cpu.bus.write(0x0000, 0x03).unwrap();
    cpu.bus.write(0x0310, 0x5A).unwrap();

    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.a, 0x5A);
}

#[test]
fn unmapped_effective_address_is_an_error() {
    let mut cpu = new_cpu(&[0xAD, 0x00, 0x60]); // LDA $6000
    assert_eq!(
        cpu.step(),
        Err(StepError::Memory(MemoryError::Unmapped(0x6000)))
    );
    assert_eq!(cpu.regs.a, 0);
}

#[test]
fn sta_writes_to_memory() {
    let mut cpu = new_cpu(&[
        0xA9, 0x33, // LDA #$33
        0x8D, 0x00, 0x02, // STA $0200
    ]);
    run_steps(&mut cpu, 2);
    assert_eq!(cpu.bus.read(0x0200), Ok(0x33));
}

#[test]
fn store_to_rom_is_rejected_without_flag_change() {
    let mut cpu = new_cpu(&[0x8D, 0x00, 0x90]); // STA $9000
    let before = cpu.regs.status;
    assert_eq!(
        cpu.step(),
        Err(StepError::Memory(MemoryError::ReadOnly(0x9000)))
    );
    assert_eq!(cpu.regs.status, before);
}

#[test]
fn tax_transfers_a_to_x() {
    let mut cpu = new_cpu(&[0xA9, 0x10, 0xAA]); // LDA #$10; TAX
    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.x, 0x10);
}

#[test]
fn jmp_changes_program_counter() {
    let mut cpu = new_cpu_with_rom(&[0x4C, 0x00, 0x90], &[(0x9000, 0xA9), (0x9001, 0x55)]);
    run_steps(&mut cpu, 2); // JMP $9000; LDA #$55
    assert_eq!(cpu.regs.a, 0x55);
}

#[test]
fn jmp_into_ram_is_rejected() {
    let mut cpu = new_cpu(&[0x4C, 0x00, 0x02]); // JMP $0200
    assert_eq!(cpu.step(), Err(StepError::PcOutOfRom(0x0200)));
}

#[test]
fn jmp_indirect_wraps_within_pointer_page() {
    // JMP ($02FF): low byte from $02FF, high byte from $0200
    let mut cpu = new_cpu(&[0x6C, 0xFF, 0x02]);
    cpu.bus.write(0x02FF, 0x34).unwrap();
    cpu.bus.write(0x0200, 0x91).unwrap();
    cpu.bus.write(0x0300, 0x00).unwrap();

    cpu.step().unwrap();
    assert_eq!(cpu.state().pc, 0x9134);
}

#[test]
fn inx_increments_x() {
    let mut cpu = new_cpu(&[0xA2, 0x01, 0xE8]); // LDX #$01; INX
    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.x, 0x02);
}

#[test]
fn dex_sets_zero_flag() {
    let mut cpu = new_cpu(&[0xA2, 0x01, 0xCA]); // LDX #$01; DEX
    run_steps(&mut cpu, 2);
    assert!(cpu.regs.status.contains(Status::ZERO));
}

#[test]
fn inc_and_dec_memory_wrap() {
    let mut cpu = new_cpu(&[
        0xE6, 0x10, // INC $10
        0xC6, 0x11, // DEC $11
    ]);
    cpu.bus.write(0x0010, 0x7F).unwrap();
    cpu.bus.write(0x0011, 0x80).unwrap();

    cpu.step().unwrap();
    assert_eq!(cpu.bus.read(0x0010), Ok(0x80));
    assert!(cpu.regs.status.contains(Status::NEGATIVE));

    cpu.step().unwrap();
    assert_eq!(cpu.bus.read(0x0011), Ok(0x7F));
    assert!(!cpu.regs.status.contains(Status::NEGATIVE));
    assert!(!cpu.regs.status.contains(Status::ZERO));
}

#[test]
fn bne_loops_until_zero() {
    let mut cpu = new_cpu(&[
        0xA2, 0x03, // LDX #3
        0xCA, // DEX
        0xD0, 0xFD, // BNE -3
    ]);
    run_steps(&mut cpu, 7);
    assert_eq!(cpu.regs.x, 0x00);
    assert_eq!(cpu.state().pc, 0x8005);
}

#[test]
fn branch_not_taken_falls_through() {
    let mut cpu = new_cpu(&[0xB0, 0x10]); // BCS +16 with C clear
    assert_eq!(cpu.step(), Ok(2));
    assert_eq!(cpu.state().pc, 0x8002);
}

#[test]
fn branch_before_rom_is_rejected() {
    let mut cpu = new_cpu(&[0x90, 0x80]); // BCC -128 from $8002
    assert_eq!(cpu.step(), Err(StepError::PcOutOfRom(0x7F82)));
}

#[test]
fn adc_adds_carry_in() {
    let mut cpu = new_cpu(&[
        0x38, // SEC
        0xA9, 0x10, // LDA #$10
        0x69, 0x20, // ADC #$20
    ]);
    run_steps(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 0x31);
    assert!(!cpu.regs.status.contains(Status::CARRY));
}

#[test]
fn adc_wraps_and_sets_carry() {
    let mut cpu = new_cpu(&[0xA9, 0xFF, 0x69, 0x02]); // LDA #$FF; ADC #$02
    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.a, 1);
    assert!(cpu.regs.status.contains(Status::CARRY));
    assert!(!cpu.regs.status.contains(Status::OVERFLOW));
}

#[test]
fn adc_signed_overflow() {
    let mut cpu = new_cpu(&[0xA9, 0x7F, 0x69, 0x01]); // 127 + 1
    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.a, -128);
    assert!(cpu.regs.status.contains(Status::OVERFLOW));
    assert!(cpu.regs.status.contains(Status::NEGATIVE));
    assert!(!cpu.regs.status.contains(Status::CARRY));
}

#[test]
fn sbc_borrows_when_carry_clear() {
    let mut cpu = new_cpu(&[
        0x38, // SEC
        0xA9, 0x05, // LDA #5
        0xE9, 0x06, // SBC #6
        0xE9, 0x01, // SBC #1 (borrow pending)
    ]);
    run_steps(&mut cpu, 3);
    assert_eq!(cpu.regs.a, -1);
    assert!(!cpu.regs.status.contains(Status::CARRY));

    cpu.step().unwrap();
    assert_eq!(cpu.regs.a, -3);
    assert!(cpu.regs.status.contains(Status::CARRY));
}

#[test]
fn sbc_signed_overflow() {
    let mut cpu = new_cpu(&[0x38, 0xA9, 0x80, 0xE9, 0x01]); // -128 - 1
    run_steps(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 127);
    assert!(cpu.regs.status.contains(Status::OVERFLOW));
    assert!(cpu.regs.status.contains(Status::CARRY));
}

#[test]
fn logic_ops_update_a() {
    let mut cpu = new_cpu(&[
        0xA9, 0xF0, // LDA #$F0
        0x29, 0x3C, // AND #$3C -> $30
        0x09, 0x81, // ORA #$81 -> $B1
        0x49, 0xB1, // EOR #$B1 -> $00
    ]);
    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.a_byte(), 0x30);
    cpu.step().unwrap();
    assert_eq!(cpu.regs.a_byte(), 0xB1);
    assert!(cpu.regs.status.contains(Status::NEGATIVE));
    cpu.step().unwrap();
    assert_eq!(cpu.regs.a, 0);
    assert!(cpu.regs.status.contains(Status::ZERO));
}

#[test]
fn bit_copies_operand_bits() {
    let mut cpu = new_cpu(&[
        0xA9, 0x01, // LDA #$01
        0x24, 0x40, // BIT $40
    ]);
    cpu.bus.write(0x0040, 0xC0).unwrap();
    run_steps(&mut cpu, 2);

    assert!(cpu.regs.status.contains(Status::ZERO));
    assert!(cpu.regs.status.contains(Status::NEGATIVE));
    assert!(cpu.regs.status.contains(Status::OVERFLOW));
    assert_eq!(cpu.regs.a, 1);
}

#[test]
fn cmp_is_unsigned() {
    // A = $01 (1), M = $FF (-1 signed): unsigned 1 < 255, so no carry
    let mut cpu = new_cpu(&[0xA9, 0x01, 0xC9, 0xFF]);
    run_steps(&mut cpu, 2);
    assert!(!cpu.regs.status.contains(Status::CARRY));
    assert!(!cpu.regs.status.contains(Status::ZERO));
    assert_eq!(cpu.regs.a, 1);
}

#[test]
fn cpx_and_cpy_compare_index_registers() {
    let mut cpu = new_cpu(&[
        0xA2, 0x10, // LDX #$10
        0xA0, 0x20, // LDY #$20
        0xE0, 0x10, // CPX #$10
        0xC0, 0x30, // CPY #$30
    ]);
    run_steps(&mut cpu, 3);
    assert!(cpu.regs.status.contains(Status::ZERO | Status::CARRY));
    cpu.step().unwrap();
    assert!(!cpu.regs.status.contains(Status::CARRY));
    assert!(cpu.regs.status.contains(Status::NEGATIVE));
}

#[test]
fn asl_accumulator_sets_carry_from_bit_7() {
    let mut cpu = new_cpu(&[0xA9, 0x81, 0x0A]); // LDA #$81; ASL A
    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.a, 0x02);
    assert!(cpu.regs.status.contains(Status::CARRY));
    assert!(!cpu.regs.status.contains(Status::NEGATIVE));
}

#[test]
fn lsr_memory_updates_zero_from_memory_result() {
    let mut cpu = new_cpu(&[
        0xA9, 0x80, // LDA #$80 (N set, Z clear)
        0x46, 0x10, // LSR $10
    ]);
    cpu.bus.write(0x0010, 0x01).unwrap();
    run_steps(&mut cpu, 2);

    assert_eq!(cpu.bus.read(0x0010), Ok(0x00));
    assert!(cpu.regs.status.contains(Status::ZERO | Status::CARRY));
    assert!(!cpu.regs.status.contains(Status::NEGATIVE));
    assert_eq!(cpu.regs.a, -128);
}

#[test]
fn rol_and_ror_rotate_through_carry() {
    let mut cpu = new_cpu(&[
        0x38, // SEC
        0xA9, 0x80, // LDA #$80
        0x2A, // ROL A -> $01, C = 1
        0x6A, // ROR A -> $80, C = 1
        0x66, 0x10, // ROR $10 -> $80 | $02 >> 1 = $81, C = 0
    ]);
    cpu.bus.write(0x0010, 0x02).unwrap();

    run_steps(&mut cpu, 3);
    assert_eq!(cpu.regs.a, 0x01);
    assert!(cpu.regs.status.contains(Status::CARRY));

    cpu.step().unwrap();
    assert_eq!(cpu.regs.a_byte(), 0x80);
    assert!(cpu.regs.status.contains(Status::CARRY | Status::NEGATIVE));

    cpu.step().unwrap();
    assert_eq!(cpu.bus.read(0x0010), Ok(0x81));
    assert!(!cpu.regs.status.contains(Status::CARRY));
    assert!(cpu.regs.status.contains(Status::NEGATIVE));
}

#[test]
fn pha_pla_round_trip() {
    let mut cpu = new_cpu(&[
        0xA9, 0x9C, // LDA #$9C
        0x48, // PHA
        0xA9, 0x00, // LDA #0
        0x68, // PLA
    ]);
    run_steps(&mut cpu, 4);
    assert_eq!(cpu.regs.a_byte(), 0x9C);
    assert!(cpu.regs.status.contains(Status::NEGATIVE));
    assert!(!cpu.regs.status.contains(Status::ZERO));
    assert!(cpu.regs.stack.is_empty());
}

#[test]
fn pla_on_empty_stack_underflows() {
    let mut cpu = new_cpu(&[0xA9, 0x05, 0x68]); // LDA #5; PLA
    cpu.step().unwrap();
    assert_eq!(
        cpu.step(),
        Err(StepError::StackUnderflow { address: 0x8002 })
    );
    assert_eq!(cpu.regs.a, 5);
}

#[test]
fn php_plp_restore_flags_except_break() {
    let mut cpu = new_cpu(&[
        0x38, // SEC
        0xF8, // SED
        0x08, // PHP
        0x18, // CLC
        0xD8, // CLD
        0x28, // PLP
    ]);
    run_steps(&mut cpu, 3);
    assert_eq!(cpu.regs.stack.peek(), Some(0x39));

    run_steps(&mut cpu, 3);
    assert_eq!(cpu.regs.status, Status::CARRY | Status::DECIMAL);
}

#[test]
fn tsx_and_txs_move_between_x_and_stack() {
    let mut cpu = new_cpu(&[
        0xA2, 0x80, // LDX #$80
        0x9A, // TXS
        0xA2, 0x01, // LDX #$01
        0xBA, // TSX
    ]);
    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.stack.as_slice(), &[0x80]);

    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.x, -128);
    assert!(cpu.regs.status.contains(Status::NEGATIVE));
    assert!(cpu.regs.stack.is_empty());
}

#[test]
fn jsr_and_rts_work() {
    let mut cpu = new_cpu_with_rom(
        &[
            0x20, 0x00, 0x90, // JSR $9000
            0xA9, 0x11, // LDA #$11
        ],
        &[(0x9000, 0xA9), (0x9001, 0x22), (0x9002, 0x60)], // LDA #$22; RTS
    );

    cpu.step().unwrap(); // JSR
    assert_eq!(cpu.regs.stack.as_slice(), &[0x80, 0x02]);
    cpu.step().unwrap(); // LDA #$22
    cpu.step().unwrap(); // RTS
    assert_eq!(cpu.state().pc, 0x8003);
    cpu.step().unwrap(); // LDA #$11

    assert_eq!(cpu.regs.a, 0x11);
}

#[test]
fn brk_and_rti_round_trip() {
    let mut cpu = new_cpu_with_rom(
        &[
            0x38, // SEC
            0x00, 0xFF, // BRK + padding
            0xA9, 0x01, // LDA #$01
        ],
        &[(0xFFFE, 0x00), (0xFFFF, 0x90), (0x9000, 0x18), (0x9001, 0x40)], // CLC; RTI
    );

    run_steps(&mut cpu, 2);
    assert_eq!(cpu.state().pc, 0x9000);
    assert!(cpu.regs.status.contains(Status::BREAK | Status::INTERRUPT_DISABLE));
    assert_eq!(cpu.regs.stack.as_slice(), &[0x80, 0x03, 0x31]);

    run_steps(&mut cpu, 2); // CLC; RTI
    assert_eq!(cpu.state().pc, 0x8003);
    assert!(cpu.regs.status.contains(Status::CARRY));
    assert!(!cpu.regs.status.contains(Status::INTERRUPT_DISABLE));
    assert!(!cpu.regs.status.contains(Status::BREAK));
    assert!(cpu.regs.stack.is_empty());

    cpu.step().unwrap();
    assert_eq!(cpu.regs.a, 1);
}

#[test]
fn plp_clears_break_left_by_brk() {
    let mut cpu = new_cpu(&[
        0x08, // PHP
        0x28, // PLP
    ]);
    cpu.regs.status = Status::BREAK | Status::CARRY;
    run_steps(&mut cpu, 2);
    assert_eq!(cpu.regs.status, Status::CARRY);
    assert_eq!(cpu.regs.status.to_string(), "nv-bdizC");
}

#[test]
fn rts_to_ram_leaves_stack_intact() {
    let mut cpu = new_cpu(&[
        0xA9, 0x00, // LDA #0
        0x48, // PHA
        0x48, // PHA
        0x60, // RTS -> $0001
    ]);
    run_steps(&mut cpu, 3);
    assert_eq!(cpu.step(), Err(StepError::PcOutOfRom(0x0001)));
    assert_eq!(cpu.regs.stack.as_slice(), &[0x00, 0x00]);
}

#[test]
fn rti_to_ram_leaves_stack_and_flags_intact() {
    let mut cpu = new_cpu(&[0x40]); // RTI -> $0200
    for b in [0x02, 0x00, 0xC3] {
        cpu.regs.stack.push(b);
    }
    cpu.regs.status = Status::BREAK | Status::ZERO;

    assert_eq!(cpu.step(), Err(StepError::PcOutOfRom(0x0200)));
    assert_eq!(cpu.regs.stack.as_slice(), &[0x02, 0x00, 0xC3]);
    assert_eq!(cpu.regs.status, Status::BREAK | Status::ZERO);
}

#[test]
fn rts_with_one_byte_underflows_without_popping() {
    let mut cpu = new_cpu(&[0x60]); // RTS
    cpu.regs.stack.push(0x80);
    assert_eq!(cpu.step(), Err(StepError::StackUnderflow { address: 0x8000 }));
    assert_eq!(cpu.regs.stack.as_slice(), &[0x80]);
}

#[test]
fn status_instructions_touch_one_flag() {
    let mut cpu = new_cpu(&[0x38, 0x78, 0xF8, 0x18, 0x58, 0xD8]);
    run_steps(&mut cpu, 3);
    assert_eq!(
        cpu.regs.status,
        Status::CARRY | Status::INTERRUPT_DISABLE | Status::DECIMAL
    );
    run_steps(&mut cpu, 3);
    assert_eq!(cpu.regs.status, Status::empty());
}

#[test]
fn clv_clears_only_overflow() {
    let mut cpu = new_cpu(&[0xB8]); // CLV
    cpu.regs.status = Status::OVERFLOW | Status::ZERO;
    cpu.step().unwrap();
    assert_eq!(cpu.regs.status, Status::ZERO);
}

#[test]
fn unknown_opcode_is_skipped_by_run() {
    let mut cpu = new_cpu(&[
        0x02, // illegal
        0xA9, 0x07, // LDA #7
    ]);
    assert_eq!(
        cpu.step(),
        Err(StepError::UnknownOpcode {
            opcode: 0x02,
            address: 0x8000
        })
    );
    assert_eq!(cpu.state().pc, 0x8001);

    cpu.reset();
    let summary = cpu.run(2).unwrap();
    assert_eq!(summary.steps, 2);
    assert_eq!(summary.executed, 1);
    assert_eq!(summary.reported_errors, 1);
    assert_eq!(cpu.regs.a, 7);
}

#[test]
fn run_stops_on_stack_underflow() {
    let mut cpu = new_cpu(&[0xE8, 0x60, 0xE8]); // INX; RTS; INX
    assert_eq!(
        cpu.run(10),
        Err(StepError::StackUnderflow { address: 0x8001 })
    );
    assert_eq!(cpu.regs.x, 1);
}

#[test]
fn running_off_the_end_of_rom_is_reported() {
    let mut cpu = new_cpu_with_rom(&[], &[(0xFFFF, 0xEA)]); // NOP at $FFFF
    cpu.jump_to(0xFFFF).unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.state().pc, 0x10000);
    assert_eq!(cpu.step(), Err(StepError::PcOutOfRom(0x10000)));
}

#[test]
fn brk_through_unset_vector_is_rejected() {
    let mut cpu = new_cpu(&[0x00]); // BRK, vector $0000
    assert_eq!(cpu.step(), Err(StepError::PcOutOfRom(0x0000)));
    assert!(cpu.regs.stack.is_empty());
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<TraceEvent>>>);

impl TraceSink for Recorder {
    fn record(&mut self, event: &TraceEvent) {
        self.0.borrow_mut().push(event.clone());
    }
}

#[test]
fn tracer_receives_one_event_per_instruction() {
    let recorder = Recorder::default();
    let mut cpu = new_cpu(&[
        0xA9, 0x0A, // LDA #$0A
        0x69, 0x01, // ADC #$01
        0x8D, 0x00, 0x02, // STA $0200
        0xD0, 0xFE, // BNE $8007 (self)
    ])
    .with_tracer(Box::new(recorder.clone()));

    run_steps(&mut cpu, 4);

    let events = recorder.0.borrow();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0].mnemonic, Mnemonic::Lda);
    assert_eq!(events[0].operand, "#$0A");
    assert_eq!(events[0].flags, None);
    assert_eq!(events[1].flags, Some(Status::empty()));
    assert_eq!(events[2].operand, "$0200");
    assert_eq!(events[3].address, 0x8007);
    assert_eq!(events[3].operand, "$8007");
    assert_eq!(events[3].flags, Some(Status::empty()));
}
