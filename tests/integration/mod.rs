//! End-to-end tests against a solc standard-JSON output fixture.
//!
//! `tests/fixtures/SafeMath.sol` holds a library and a token contract;
//! `safemath_output.json` is its compiler output with exact byte offsets.

mod common;
mod dependencies;
mod navigation;
mod properties;
mod search;
