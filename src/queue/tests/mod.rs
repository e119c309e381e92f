//! Test modules for the shared queue
//!
//! Tests are organized by functional area.

mod helpers;
