//! End-to-end test suite
//!
//! Exercises the public facade from collection file to ranked output.
//!
//! ## Structure
//!
//! - **scenario**: the reference three-record query and its boosts
//! - **collection_files**: CSV on disk → engine → ranking
//! - **evaluation**: judgment template and metrics over a real engine
//! - **properties**: proptest invariants over random collections
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test end_to_end
//! cargo test --test end_to_end properties
//! ```

mod test_utils;

mod collection_files;
mod evaluation;
mod properties;
mod scenario;
