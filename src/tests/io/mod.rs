//! I/O collaborator tests.

mod memory_tests;
