//! Role factories

use crate::{
    Consumer, FaultPlan, Producer, RoleConfig, SequenceProducer, SummingConsumer,
};
use core_types::PairId;

/// Builds the two workers of a pair
///
/// The coordinator calls this once per pair, so a factory can vary behavior
/// by pair (faults, delays) without the coordinator knowing.
pub trait RoleFactory {
    fn producer(&self, pair_id: PairId, start_value: i32) -> Box<dyn Producer>;
    fn consumer(&self, pair_id: PairId) -> Box<dyn Consumer>;
}

/// The standard factory: sequence producers and summing consumers
#[derive(Debug, Clone, Default)]
pub struct SequenceRoles {
    config: RoleConfig,
    faults: FaultPlan,
}

impl SequenceRoles {
    pub fn new(config: RoleConfig) -> Self {
        Self {
            config,
            faults: FaultPlan::new(),
        }
    }

    pub fn with_fault_plan(mut self, faults: FaultPlan) -> Self {
        self.faults = faults;
        self
    }
}

impl RoleFactory for SequenceRoles {
    fn producer(&self, pair_id: PairId, start_value: i32) -> Box<dyn Producer> {
        Box::new(
            SequenceProducer::new(start_value, self.config.values_per_pair)
                .with_send_delay(self.config.send_delay())
                .with_faults(self.faults.injector_for(pair_id)),
        )
    }

    fn consumer(&self, pair_id: PairId) -> Box<dyn Consumer> {
        Box::new(SummingConsumer::new().with_faults(self.faults.injector_for(pair_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RoleSummary, WorkerContext};
    use core_types::WorkerId;
    use ipc::create_channel;

    #[test]
    fn test_factory_roles_work_together() {
        let roles = SequenceRoles::new(RoleConfig::immediate().with_values_per_pair(3));
        let pair = PairId::new(1);
        let (write, read) = create_channel().unwrap().into_endpoints();

        let produced = roles
            .producer(pair, 10)
            .run(write, &WorkerContext::new(WorkerId::new(), pair))
            .unwrap();
        let consumed = roles
            .consumer(pair)
            .run(read, &WorkerContext::new(WorkerId::new(), pair))
            .unwrap();

        assert_eq!(produced, RoleSummary::Produced { sent: 3 });
        assert_eq!(consumed, RoleSummary::Consumed { count: 3, sum: 33 });
    }
}
