//! End-to-end tests over fixture packages on disk.

mod helpers;
mod resolution_tests;
mod sink_tests;
mod vue_tests;
