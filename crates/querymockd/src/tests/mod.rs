//! Test suites for the emulator bootstrap and dispatch.

mod support;
