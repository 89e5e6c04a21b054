//! Client integration tests

mod executor_test;
