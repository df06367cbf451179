use crate::types::TaskRecord;

/// Sum of per-task pay for the batch.
pub fn total_payment(tasks: &[TaskRecord]) -> u32 {
    tasks.iter().map(|t| t.total_pay).sum()
}
