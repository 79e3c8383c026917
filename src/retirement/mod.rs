//! Credit retirement subsystem.
//!
//! # Data Flow
//! ```text
//! PurchaseStore (records)
//!     → flow.rs (publish unchecked list, concurrent status reads,
//!                publish reconciled list)
//!     → view.rs / progress.rs (dashboard rows and aggregates)
//!
//! retire(record)
//!     → in-flight slot → CreditLedger::retire → mark retired
//!     → notify.rs (success / failure notification)
//! ```
//!
//! # Invariants
//! - A retired credit never becomes active again within a session
//! - At most one retirement in flight per flow
//! - Status read failures fall back to active and are never surfaced

pub mod flow;
pub mod notify;
pub mod progress;
pub mod state;
pub mod view;

pub use flow::{InFlightSlot, RetireControl, RetireError, RetirementFlow};
pub use notify::{Notification, NotificationLevel, Notifier};
pub use progress::OffsetSummary;
pub use state::{RetirementState, TrackedCredit};
pub use view::{CreditRow, DashboardView};
