//! Summing consumer

use crate::{Consumer, FaultInjector, RoleError, RoleSummary, WorkerContext};
use ipc::ReadEndpoint;
use services_logger::{LogEntry, LogLevel};

/// Sums every record until the producer closes the channel
///
/// A read error or a truncated record also ends the stream. It is logged
/// and the sum so far is reported, so the consumer itself never fails.
#[derive(Debug, Clone, Default)]
pub struct SummingConsumer {
    faults: FaultInjector,
}

impl SummingConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_faults(mut self, faults: FaultInjector) -> Self {
        self.faults = faults;
        self
    }
}

impl Consumer for SummingConsumer {
    fn run(
        self: Box<Self>,
        mut endpoint: ReadEndpoint,
        ctx: &WorkerContext,
    ) -> Result<RoleSummary, RoleError> {
        LogEntry::info(format!("Consumer ({}) starting...", ctx.worker_id))
            .with_field("pair", ctx.pair_id.get())
            .emit();

        let mut count = 0;
        let mut sum: i64 = 0;
        loop {
            self.faults.before_receive(count);
            let number = match endpoint.read_record() {
                Ok(Some(number)) => number,
                Ok(None) => break,
                Err(err) => {
                    LogEntry::new(LogLevel::Error, format!("Consumer: Read failed: {}", err))
                        .with_source(ctx.worker_id)
                        .emit();
                    break;
                }
            };
            count += 1;
            sum += i64::from(number);
            LogEntry::info(format!(
                "Consumer: Received {}, running sum: {}",
                number, sum
            ))
            .emit();
        }

        LogEntry::info(format!("Consumer: Final sum: {}", sum))
            .with_field("pair", ctx.pair_id.get())
            .with_field("count", count)
            .emit();
        endpoint.close();
        Ok(RoleSummary::Consumed { count, sum })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captured_log;
    use core_types::{PairId, WorkerId};
    use ipc::create_channel;

    fn ctx() -> WorkerContext {
        WorkerContext::new(WorkerId::new(), PairId::new(0))
    }

    #[test]
    fn test_sums_until_end_of_stream() {
        let (mut write, read) = create_channel().unwrap().into_endpoints();
        for value in 1..=5 {
            write.write_record(value).unwrap();
        }
        write.close();

        let summary = Box::new(SummingConsumer::new()).run(read, &ctx()).unwrap();
        assert_eq!(summary, RoleSummary::Consumed { count: 5, sum: 15 });
    }

    #[test]
    fn test_logs_running_sum_per_record() {
        let (mut write, read) = create_channel().unwrap().into_endpoints();
        for value in 1..=5 {
            write.write_record(value).unwrap();
        }
        write.close();

        captured_log::start();
        Box::new(SummingConsumer::new()).run(read, &ctx()).unwrap();
        let lines = captured_log::take();

        let received: Vec<&str> = lines
            .iter()
            .map(String::as_str)
            .filter(|line| line.starts_with("Consumer: Received"))
            .collect();
        assert_eq!(
            received,
            vec![
                "Consumer: Received 1, running sum: 1",
                "Consumer: Received 2, running sum: 3",
                "Consumer: Received 3, running sum: 6",
                "Consumer: Received 4, running sum: 10",
                "Consumer: Received 5, running sum: 15",
            ]
        );
        assert!(lines
            .last()
            .is_some_and(|line| line.starts_with("Consumer: Final sum: 15")));
    }

    #[test]
    fn test_empty_stream_sums_to_zero() {
        let (write, read) = create_channel().unwrap().into_endpoints();
        drop(write);

        let summary = Box::new(SummingConsumer::new()).run(read, &ctx()).unwrap();
        assert_eq!(summary, RoleSummary::Consumed { count: 0, sum: 0 });
    }

    #[test]
    fn test_large_values_do_not_overflow() {
        let (mut write, read) = create_channel().unwrap().into_endpoints();
        write.write_record(i32::MAX).unwrap();
        write.write_record(i32::MAX).unwrap();
        write.close();

        let summary = Box::new(SummingConsumer::new()).run(read, &ctx()).unwrap();
        assert_eq!(
            summary,
            RoleSummary::Consumed {
                count: 2,
                sum: 2 * i64::from(i32::MAX)
            }
        );
    }

    #[test]
    fn test_truncated_record_ends_stream() {
        let (mut write, read) = create_channel().unwrap().into_endpoints();
        write.write_record(4).unwrap();
        write.write(&[9]).unwrap();
        write.close();

        let summary = Box::new(SummingConsumer::new()).run(read, &ctx()).unwrap();
        assert_eq!(summary, RoleSummary::Consumed { count: 1, sum: 4 });
    }
}
