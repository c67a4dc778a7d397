// Shared helpers for the integration test crates. Each aggregator pulls
// this in through `#[path = "../common/mod.rs"]`.
#![allow(dead_code)]


/// Route `log` output through the test harness.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
