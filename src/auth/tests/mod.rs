//! Unit tests for sessions and access control.

mod session_tests;
