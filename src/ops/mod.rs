//! Administrative operations: thin call-and-report wrappers around one
//! external client method each. Callers catch errors at the action boundary.

pub mod collections;
pub mod memories;

pub use memories::DEFAULT_USER_ID;
