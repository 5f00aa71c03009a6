//! Config module tests.

mod destination_tests;
