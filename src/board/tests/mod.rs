//! Test suite for the board aggregate.

mod domain_tests;
mod lifecycle_tests;
