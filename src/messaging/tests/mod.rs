//! Unit tests for the messaging context.
