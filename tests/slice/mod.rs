//! Reachability engine tests
//!
//! - Slicing scenarios over the sample project
//! - Closure properties: singleton, recursion, ordering, promotion
//! - Promotion of members outside class and interface bodies
//! - Merged declarations and alias chains
//! - Root requests: arity, wildcards, missing roots

pub mod tests_promotion;
pub mod tests_roots;
pub mod tests_scenarios;
