//! Pure policy verification (no IO).
//!
//! Input: expected policy/rule specs plus a describe collaborator supplied by the caller.
//! Output: findings + verdict + summary data.

#![forbid(unsafe_code)]

pub mod describe;
pub mod model;
pub mod observed;
pub mod policy;
pub mod report;

mod checks;
mod compare;
mod fingerprint;
mod verify;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use describe::{Describe, DescribeError};
pub use verify::{verify_policy, verify_rule, verify_suite};
