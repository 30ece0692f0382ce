//! Core components of the ratethrottler library
//!
//! This module contains the fundamental building blocks:
//! - [`policy`]: rate limit rules (bound over a time window)
//! - [`window`]: per-key admission history and the sliding-window decision
//! - [`registry`]: the key to limiter-state mapping
//! - [`throttler`]: the public [`RateThrottler`] engine
//! - [`snapshot`]: the persisted snapshot encoding

pub mod policy;
pub mod registry;
pub mod snapshot;
pub mod throttler;
pub mod window;


pub use policy::{WindowPolicy, WindowUnit};
pub use throttler::RateThrottler;

use std::error::Error;
use std::fmt;

/// Errors surfaced by throttler operations
///
/// All operations are synchronous and in-memory; nothing is retried
/// internally, every failure is returned to the caller immediately.
///
/// # Example
///
/// ```
/// use ratethrottler::{RateThrottler, ThrottleError};
///
/// let throttler = RateThrottler::new();
///
/// match throttler.throttle("unconfigured-key") {
///     Err(ThrottleError::NotConfigured(key)) => {
///         println!("configure {key} before throttling it");
///     }
///     _ => unreachable!(),
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThrottleError {
    /// `throttle` was called for a key with no configured policy
    NotConfigured(String),
    /// `purge` was called for a key with no limiter entry
    UnknownKey(String),
    /// The policy supplied to `configure` is invalid
    InvalidPolicy(String),
    /// A snapshot string does not parse as a key to timestamp-list mapping
    MalformedSnapshot(String),
}

impl fmt::Display for ThrottleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThrottleError::NotConfigured(key) => {
                write!(f, "key {key:?} is not configured; configure it before throttling")
            }
            ThrottleError::UnknownKey(key) => write!(f, "key {key:?} has no limiter entry"),
            ThrottleError::InvalidPolicy(msg) => write!(f, "invalid policy: {msg}"),
            ThrottleError::MalformedSnapshot(msg) => write!(f, "malformed snapshot: {msg}"),
        }
    }
}

impl Error for ThrottleError {}
