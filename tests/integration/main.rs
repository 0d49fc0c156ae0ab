//! Integration test harness.

mod mock_source;
mod session_loop;
