#![allow(dead_code, unused_imports)]

pub use watchdog_test_utils::builders;
pub use watchdog_test_utils::fake_executor::FakeExecutor;
pub use watchdog_test_utils::fake_source::{FakeSource, FakeSourceHandle};
pub use watchdog_test_utils::{init_tracing, with_timeout};
