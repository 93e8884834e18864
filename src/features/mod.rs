//! Domain-level client features and their shared logic. Routes import these
//! modules to keep view code focused while session, guard and API handling
//! stay in dedicated feature areas.

pub mod auth;
