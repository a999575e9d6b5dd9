//! monofont End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the full conversion pipeline:
//!
//! - Conversion: synthetic outlines -> encoded font, module or binary file
//! - Rendering: encoded font -> pixels on a [`MonoBuffer`](monofont_render::MonoBuffer)
//! - **Round-trip**: every rendered glyph reproduces its placed cell
//! - **Determinism**: identical parameters produce byte-identical artifacts
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p monofont-tests
//! ```
//!
//! ## Round-trip Testing
//!
//! ```rust,ignore
//! use monofont_tests::fixtures::{block_font, params_for, ALL_ENCODINGS};
//! use monofont_tests::harness::assert_roundtrip;
//!
//! for encoding in ALL_ENCODINGS {
//!     let font = block_font(&params_for(12, encoding));
//!     let encoded = font.encode(encoding).unwrap();
//!     assert_roundtrip(&font, &encoded.as_font_data());
//! }
//! ```

pub mod determinism;
pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use determinism::{compute_hash, verify_determinism, DeterminismResult};
pub use harness::{assert_roundtrip, cell_buffer, render_glyph, TestHarness};
