//! Race reconciliation engine: pure transitions over the board state.
//!
//! Architecture:
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Feed / Tick │────►│    Runner    │────►│   Reducer    │
//! │  / Commands  │     │ (serialized) │     │  (pure fn)   │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!                                                  │
//!                          merge → sweep → project │
//!                                                  ▼
//!                      ┌──────────────┐     ┌──────────────┐
//!                      │    Board     │◄────│    State     │
//!                      │  (display)   │     │  (digested)  │
//!                      └──────────────┘     └──────────────┘
//! ```
//!
//! Nothing in this module reads the clock or performs I/O: `now` is an
//! explicit argument and observations come back as [`events::Note`]s.

pub mod category;
pub mod events;
pub mod normalize;
pub mod projection;
pub mod reducer;
pub mod state;
pub mod sweep;
