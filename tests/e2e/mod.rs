//! End-to-end suites sharing `crate::mocks`

mod aggregation_tests;
mod http_upstream_tests;
mod middleware_tests;
