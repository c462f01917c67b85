//! # SHIELD-NET Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── verification.rs  # flow → dashboard → navigation
//!     ├── feed.rs          # producers → bus → consumer → dashboard
//!     └── uplink.rs        # WebSocket backend → uplink → dashboard
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sn-tests
//! cargo test -p sn-tests integration::uplink::
//! ```

#![allow(dead_code)]

pub mod integration;
