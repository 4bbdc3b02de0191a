use keyguard_core::rules::RuleResult;

/// Result slots for one batch, index-aligned with the requests.
#[derive(Debug)]
pub struct ResultSlots {
    slots: Vec<RuleResult>,
}

impl ResultSlots {
    /// `len` slots, all `Unknown`.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![RuleResult::Unknown; len],
        }
    }

    /// Whole-batch failure. An empty batch still answers one `Failed`.
    pub fn failed(len: usize) -> Vec<RuleResult> {
        vec![RuleResult::Failed; len.max(1)]
    }

    pub fn set(&mut self, index: usize, result: RuleResult) {
        if let Some(slot) = self.slots.get_mut(index) {
            *slot = result;
        }
    }

    /// Final results; any slot never decided becomes `Failed`.
    pub fn finish(self) -> Vec<RuleResult> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(index, r)| {
                if r == RuleResult::Unknown {
                    tracing::error!(index, "result slot left undecided");
                    RuleResult::Failed
                } else {
                    r
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_fails_once() {
        assert_eq!(ResultSlots::failed(0), vec![RuleResult::Failed]);
        assert_eq!(ResultSlots::failed(3).len(), 3);
    }

    #[test]
    fn undecided_slots_finish_as_failed() {
        let mut slots = ResultSlots::new(3);
        slots.set(0, RuleResult::Approved);
        slots.set(2, RuleResult::Denied);
        slots.set(7, RuleResult::Approved);
        assert_eq!(
            slots.finish(),
            vec![RuleResult::Approved, RuleResult::Failed, RuleResult::Denied]
        );
    }
}
