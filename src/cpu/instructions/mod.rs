//! Instruction semantics, one handler per mnemonic, grouped by family.
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, BIT
//! - **compare**: CMP, CPX, CPY
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **stack**: PHA, PHP, PLA, PLP
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP
//!
//! Handlers receive the already-resolved operand and update only the flags listed in
//! [`Mnemonic::affected_flags`], after every fallible access of the instruction has succeeded.

mod alu;
mod branches;
mod compare;
mod control;
mod flags;
mod inc_dec;
mod load_store;
mod shifts;
mod stack;
mod transfer;

use crate::{
    bus::Bus,
    cpu::{addressing::Operand, cpu::CPU, opcodes::Mnemonic},
    error::StepError,
};

impl<B: Bus> CPU<B> {
    pub(crate) fn execute(&mut self, mnemonic: Mnemonic, operand: Operand) -> Result<(), StepError> {
        use Mnemonic::*;
        match mnemonic {
            Adc => alu::adc(self, operand),
            Sbc => alu::sbc(self, operand),
            And => alu::and(self, operand),
            Ora => alu::ora(self, operand),
            Eor => alu::eor(self, operand),
            Bit => alu::bit(self, operand),
            Cmp => compare::cmp(self, operand),
            Cpx => compare::cpx(self, operand),
            Cpy => compare::cpy(self, operand),
            Asl => shifts::asl(self, operand),
            Lsr => shifts::lsr(self, operand),
            Rol => shifts::rol(self, operand),
            Ror => shifts::ror(self, operand),
            Bcc => branches::bcc(self, operand),
            Bcs => branches::bcs(self, operand),
            Beq => branches::beq(self, operand),
            Bne => branches::bne(self, operand),
            Bmi => branches::bmi(self, operand),
            Bpl => branches::bpl(self, operand),
            Bvc => branches::bvc(self, operand),
            Bvs => branches::bvs(self, operand),
            Lda => load_store::lda(self, operand),
            Ldx => load_store::ldx(self, operand),
            Ldy => load_store::ldy(self, operand),
            Sta => load_store::sta(self, operand),
            Stx => load_store::stx(self, operand),
            Sty => load_store::sty(self, operand),
            Inc => inc_dec::inc(self, operand),
            Dec => inc_dec::dec(self, operand),
            Inx => inc_dec::inx(self),
            Iny => inc_dec::iny(self),
            Dex => inc_dec::dex(self),
            Dey => inc_dec::dey(self),
            Pha => stack::pha(self),
            Php => stack::php(self),
            Pla => stack::pla(self),
            Plp => stack::plp(self),
            Tax => transfer::tax(self),
            Tay => transfer::tay(self),
            Txa => transfer::txa(self),
            Tya => transfer::tya(self),
            Tsx => transfer::tsx(self),
            Txs => transfer::txs(self),
            Clc => flags::clc(self),
            Sec => flags::sec(self),
            Cli => flags::cli(self),
            Sei => flags::sei(self),
            Cld => flags::cld(self),
            Sed => flags::sed(self),
            Clv => flags::clv(self),
            Jmp => control::jmp(self, operand),
            Jsr => control::jsr(self, operand),
            Rts => control::rts(self),
            Rti => control::rti(self),
            Brk => control::brk(self),
            Nop => Ok(()),
        }
    }
}
