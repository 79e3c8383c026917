//! Per-credit retirement state.

use serde::Serialize;

use crate::store::PurchaseRecord;

/// Where a credit stands in its retirement lifecycle.
///
/// `Retired` is terminal: no observation moves a credit out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RetirementState {
    /// Loaded from the store, not yet checked on-chain.
    #[default]
    Unknown,
    /// Not retired, or the check could not be completed.
    Active,
    Retired,
}

impl RetirementState {
    /// Fold an on-chain status read into the current state.
    ///
    /// A failed read (`None`) counts as not retired.
    pub fn observe(self, retired: Option<bool>) -> Self {
        match (self, retired) {
            (RetirementState::Retired, _) => RetirementState::Retired,
            (_, Some(true)) => RetirementState::Retired,
            (_, Some(false)) | (_, None) => RetirementState::Active,
        }
    }

    /// Keep whichever state is further along.
    pub fn merge(self, other: Self) -> Self {
        if self == RetirementState::Retired || other == RetirementState::Retired {
            RetirementState::Retired
        } else if self == RetirementState::Active || other == RetirementState::Active {
            RetirementState::Active
        } else {
            RetirementState::Unknown
        }
    }

    pub fn is_retired(self) -> bool {
        self == RetirementState::Retired
    }
}

/// A purchase record together with its session-local retirement state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedCredit {
    pub record: PurchaseRecord,
    pub state: RetirementState,
}

impl TrackedCredit {
    pub fn new(record: PurchaseRecord) -> Self {
        Self {
            record,
            state: RetirementState::Unknown,
        }
    }

    pub fn id(&self) -> &str {
        &self.record.id
    }

    pub fn is_retired(&self) -> bool {
        self.state.is_retired()
    }
}
