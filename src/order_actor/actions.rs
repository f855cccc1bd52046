use crate::domain::Decision;

/// Custom actions for Order entities.
#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Moves a pending order to its terminal approval state.
    ///
    /// Executed inside the order actor, so the pending check and the write
    /// form one compare-and-set.
    Decide {
        decision: Decision,
        decided_by: String,
    },
}
