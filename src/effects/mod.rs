//! Effects-as-data for tracker updates.
//!
//! Webhook handlers are pure: they return [`WorkUnit`]s describing what should
//! happen to the tracker. [`dispatch_units`] executes them against a
//! [`crate::tracker::TrackerGateway`] and reports an [`UpdateOutcome`] per unit.
//!
//! Keeping the two apart means handler logic is tested without I/O and the
//! dispatcher is tested against a recording gateway.

mod dispatch;
mod intent;
mod outcome;

pub use dispatch::dispatch_units;
pub use intent::{UpdateIntent, WorkUnit};
pub use outcome::UpdateOutcome;
