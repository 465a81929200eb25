//! Unit tests for the notification context.

mod memory_tests;
mod service_tests;
