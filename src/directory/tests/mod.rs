//! Unit tests for the directory module.

mod domain_tests;
