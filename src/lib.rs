//! # RateThrottler
//!
//! A per-key sliding-window invocation rate limiter with snapshot persistence.
//!
//! ## Overview
//!
//! RateThrottler gates access to named operations ("invocations"). Each key is
//! configured with a [`WindowPolicy`] — a maximum number of admissions (the
//! bound) over a rolling time window — and every call to
//! [`throttle`](RateThrottler::throttle) decides whether the invocation is
//! admitted or denied right now:
//!
//! - **Sliding-window counter**: tracks the last `bound` admission timestamps
//!   per key and compares only the oldest one against the window, giving
//!   O(1) amortized decisions with O(bound) space per key
//! - **Thread safe**: structural operations and per-key decisions can run
//!   concurrently from many threads
//! - **Snapshot persistence**: the full per-key state serializes to a compact
//!   JSON form and can be rehydrated after a restart
//!
//! ## Quick Start
//!
//! ```
//! use ratethrottler::{RateThrottler, WindowPolicy};
//! use std::time::SystemTime;
//!
//! let throttler = RateThrottler::new();
//!
//! // Allow 2 calls per second for the "orders-api" invocation
//! throttler.configure("orders-api", WindowPolicy::seconds(2, 1))?;
//!
//! // `throttle` returns true when the call must be DENIED; `throttle_at`
//! // is the same decision with the clock supplied by the caller
//! let now = SystemTime::now();
//! assert!(!throttler.throttle_at("orders-api", now)?); // admitted
//! assert!(!throttler.throttle_at("orders-api", now)?); // admitted
//! assert!(throttler.throttle_at("orders-api", now)?); // limit reached
//! # Ok::<(), ratethrottler::ThrottleError>(())
//! ```
//!
//! ## Snapshots
//!
//! The entire registry — every key with its ordered admission history — can
//! be captured as a string and handed to an external store, then restored at
//! startup. Policies are operational configuration and are deliberately not
//! part of the snapshot: after a restore, each key keeps its history but must
//! be re-armed with [`configure`](RateThrottler::configure) before traffic
//! resumes.
//!
//! ```
//! use ratethrottler::{RateThrottler, WindowPolicy};
//!
//! let throttler = RateThrottler::new();
//! throttler.configure("search-api", WindowPolicy::minutes(100, 5))?;
//! throttler.throttle("search-api")?;
//!
//! let snapshot = throttler.take_snapshot()?;
//!
//! // ...process restarts...
//! let restored = RateThrottler::new();
//! restored.reconstruct(&snapshot)?;
//! restored.configure("search-api", WindowPolicy::minutes(100, 5))?;
//! assert_eq!(restored.take_snapshot()?, snapshot);
//! # Ok::<(), ratethrottler::ThrottleError>(())
//! ```
//!
//! ## Features
//!
//! - `ahash` (default): Use AHash for faster key hashing

pub mod core;

pub use core::{RateThrottler, ThrottleError, WindowPolicy, WindowUnit};
