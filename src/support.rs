//! Supporting utilities used by the state container and its strategies.

pub mod constraint;
pub mod units;
