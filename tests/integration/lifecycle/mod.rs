//! Lifecycle tests on real sockets

mod lifecycle_test;
