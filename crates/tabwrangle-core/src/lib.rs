//! tabwrangle-core: heuristic tab lifecycle management
//!
//! This crate is the core of an automatic tab-closing service: tabs that sit
//! idle past a deadline are closed ("wrangled") into a bounded, recoverable
//! archive, protected tabs are never touched, and archived tabs can be
//! restored ("unwrangled") with their navigation history when the browser
//! still holds a matching session record.
//!
//! The hard part is identity: a tab's identifier does not survive a
//! close/reopen cycle, so "the same tab" can only be decided heuristically
//! from several non-unique fields. Everything here is built around that
//! constraint.
//!
//! # Architecture
//!
//! ```text
//! scheduler ─► AccessTracker ─► lock predicate ─► TabWrangler
//!                                                     │
//!                  ClosedTabArchive ◄─ wrangle / unwrangle ─► TabHost port
//! ```
//!
//! # Modules
//!
//! - `tab`: tab and session observation types
//! - `matching`: fuzzy equality heuristics between observations
//! - `access`: last-accessed ledger feeding idle-candidate selection
//! - `lock`: closure-eligibility predicate (pinned/whitelist/audio/lock list)
//! - `archive`: bounded newest-first closed-tab archive with eviction
//! - `ports`: trait seams for the browser, settings, counters, and clock
//! - `config`: settings shape, defaults, TOML loading
//! - `service`: the `TabWrangler` service object tying it all together
//! - `logging`: tracing setup
//! - `error`: error types
//!
//! # Safety
//!
//! This crate forbids unsafe code.

#![forbid(unsafe_code)]

pub mod access;
pub mod archive;
pub mod config;
pub mod error;
pub mod lock;
pub mod logging;
pub mod matching;
pub mod ports;
pub mod service;
pub mod tab;

pub use archive::{ClosedTabArchive, WrangleOption, WrangleOutcome};
pub use config::WranglerSettings;
pub use error::{Error, Result};
pub use ports::{Clock, CounterStore, SettingsProvider, SystemClock, TabHost};
pub use service::{TabWrangler, UnwranglePair};
pub use tab::{ArchivedTab, LiveTab, SessionRecord, SessionTab, TabId};
