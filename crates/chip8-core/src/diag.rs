//! Diagnostic counters and the host-facing diagnostic channel.

use std::sync::mpsc::Sender;

use crate::ExecutionFault;

/// Event reported through a [`DiagnosticSink`] in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticEvent {
    /// Fetched word is not a canonical operation; it was skipped.
    UnknownOpcode {
        /// Address the word was fetched from.
        pc: u16,
        /// Raw instruction word.
        opcode: u16,
    },
    /// Execution fault; the machine has halted.
    Fault {
        /// Raised fault.
        cause: ExecutionFault,
        /// Address of the faulting instruction.
        pc: u16,
    },
    /// An instruction store into the font region was discarded.
    DeniedFontWrite {
        /// Target address of the discarded store.
        addr: u16,
        /// Address of the storing instruction.
        pc: u16,
    },
}

/// Receiver for [`DiagnosticEvent`]s.
pub trait DiagnosticSink {
    /// Records an event in execution order.
    fn on_event(&mut self, event: DiagnosticEvent);
}

impl DiagnosticSink for Vec<DiagnosticEvent> {
    fn on_event(&mut self, event: DiagnosticEvent) {
        self.push(event);
    }
}

/// Forwards events to another thread. Events are dropped once the receiver
/// has hung up.
impl DiagnosticSink for Sender<DiagnosticEvent> {
    fn on_event(&mut self, event: DiagnosticEvent) {
        let _ = self.send(event);
    }
}

/// Saturating counters describing what the machine has executed so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    /// Instructions fetched and executed, recognised or not.
    pub instruction_count: u64,
    /// Fetched words that matched no canonical operation.
    pub unknown_opcode_count: u32,
    /// Most recent unrecognised word and the address it was fetched from.
    pub last_unknown_opcode: Option<(u16, u16)>,
    /// Faults raised.
    pub fault_count: u32,
    /// Most recent fault and the address of the faulting instruction.
    pub last_fault: Option<(ExecutionFault, u16)>,
    /// Instruction stores into the font region that were discarded.
    pub denied_write_count: u32,
}

impl Diagnostics {
    /// Counts one executed instruction.
    pub const fn record_instruction(&mut self) {
        self.instruction_count = self.instruction_count.saturating_add(1);
    }

    /// Folds an event into the counters.
    pub const fn record(&mut self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::UnknownOpcode { pc, opcode } => {
                self.unknown_opcode_count = self.unknown_opcode_count.saturating_add(1);
                self.last_unknown_opcode = Some((opcode, pc));
            }
            DiagnosticEvent::Fault { cause, pc } => {
                self.fault_count = self.fault_count.saturating_add(1);
                self.last_fault = Some((cause, pc));
            }
            DiagnosticEvent::DeniedFontWrite { .. } => {
                self.denied_write_count = self.denied_write_count.saturating_add(1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::{DiagnosticEvent, DiagnosticSink, Diagnostics};
    use crate::ExecutionFault;

    #[test]
    fn events_update_matching_counters() {
        let mut diag = Diagnostics::default();
        diag.record_instruction();
        diag.record(DiagnosticEvent::UnknownOpcode {
            pc: 0x204,
            opcode: 0x0123,
        });
        diag.record(DiagnosticEvent::Fault {
            cause: ExecutionFault::StackUnderflow,
            pc: 0x206,
        });
        diag.record(DiagnosticEvent::DeniedFontWrite {
            addr: 0x050,
            pc: 0x208,
        });

        assert_eq!(diag.instruction_count, 1);
        assert_eq!(diag.unknown_opcode_count, 1);
        assert_eq!(diag.last_unknown_opcode, Some((0x0123, 0x204)));
        assert_eq!(diag.fault_count, 1);
        assert_eq!(
            diag.last_fault,
            Some((ExecutionFault::StackUnderflow, 0x206))
        );
        assert_eq!(diag.denied_write_count, 1);
    }

    #[test]
    fn counters_saturate() {
        let mut diag = Diagnostics {
            instruction_count: u64::MAX,
            unknown_opcode_count: u32::MAX,
            ..Diagnostics::default()
        };
        diag.record_instruction();
        diag.record(DiagnosticEvent::UnknownOpcode { pc: 0, opcode: 0 });

        assert_eq!(diag.instruction_count, u64::MAX);
        assert_eq!(diag.unknown_opcode_count, u32::MAX);
    }


    #[test]
    fn vec_sink_keeps_order() {
        let mut sink: Vec<DiagnosticEvent> = Vec::new();
        sink.on_event(DiagnosticEvent::UnknownOpcode { pc: 1, opcode: 2 });
        sink.on_event(DiagnosticEvent::DeniedFontWrite { addr: 3, pc: 4 });
        assert_eq!(sink.len(), 2);
        assert!(matches!(sink[0], DiagnosticEvent::UnknownOpcode { .. }));
    }

    #[test]
    fn channel_sink_forwards_and_tolerates_hang_up() {
        let (mut tx, rx) = mpsc::channel();
        tx.on_event(DiagnosticEvent::DeniedFontWrite { addr: 0x050, pc: 0x200 });
        assert_eq!(
            rx.try_recv(),
            Ok(DiagnosticEvent::DeniedFontWrite { addr: 0x050, pc: 0x200 })
        );

        drop(rx);
        tx.on_event(DiagnosticEvent::UnknownOpcode { pc: 0, opcode: 0 });
    }
}
