//! Renewal projection and urgency classification for recurring items.

pub mod renewal;
pub mod urgency;

pub use renewal::{project, RenewalProjection, RenewalProjector};
pub use urgency::{classify, Urgency, UrgencyThresholds};
