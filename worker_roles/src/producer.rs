//! Sequence producer

use crate::{FaultInjector, Producer, RoleError, RoleSummary, WorkerContext};
use ipc::{WriteEndpoint, RECORD_SIZE};
use services_logger::LogEntry;
use std::thread;
use std::time::Duration;

/// Sends `count` consecutive integers starting at `start_value`
#[derive(Debug, Clone)]
pub struct SequenceProducer {
    start_value: i32,
    count: usize,
    send_delay: Duration,
    faults: FaultInjector,
}

impl SequenceProducer {
    pub fn new(start_value: i32, count: usize) -> Self {
        Self {
            start_value,
            count,
            send_delay: Duration::ZERO,
            faults: FaultInjector::none(),
        }
    }

    pub fn with_send_delay(mut self, send_delay: Duration) -> Self {
        self.send_delay = send_delay;
        self
    }

    pub fn with_faults(mut self, faults: FaultInjector) -> Self {
        self.faults = faults;
        self
    }

    /// Last value of the sequence, `None` if it does not fit in an `i32`
    ///
    /// An empty sequence reports its start value.
    fn last_value(&self) -> Option<i32> {
        let span = i32::try_from(self.count.saturating_sub(1)).ok()?;
        self.start_value.checked_add(span)
    }
}

impl Producer for SequenceProducer {
    fn run(
        self: Box<Self>,
        mut endpoint: WriteEndpoint,
        ctx: &WorkerContext,
    ) -> Result<RoleSummary, RoleError> {
        LogEntry::info(format!("Producer ({}) starting...", ctx.worker_id))
            .with_field("pair", ctx.pair_id.get())
            .emit();

        if self.last_value().is_none() {
            return Err(RoleError::ValueRange {
                start: self.start_value,
                count: self.count,
            });
        }

        let values = (0..self.count).map_while(|offset| {
            i32::try_from(offset)
                .ok()
                .and_then(|offset| self.start_value.checked_add(offset))
        });

        let mut sent = 0;
        for number in values {
            self.faults.before_send(sent, endpoint.end())?;

            let written = endpoint.write_record(number)?;
            if written != RECORD_SIZE {
                return Err(RoleError::ShortWrite {
                    written,
                    expected: RECORD_SIZE,
                });
            }
            sent += 1;

            LogEntry::info(format!("Producer: Sent number {}", number)).emit();
            if !self.send_delay.is_zero() {
                thread::sleep(self.send_delay);
            }
        }

        LogEntry::info(format!("Producer: Finished sending {} numbers", sent)).emit();
        endpoint.close();
        Ok(RoleSummary::Produced { sent })
    }
}
