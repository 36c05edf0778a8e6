//! Project context tests against real directories

pub mod tests_context;
