// Buyer persona models and rule tables
pub mod personas;

// Image description adapters
pub mod image;

// A/B test workflow
pub mod ab_test;

// Bounded-concurrency batch execution
pub mod batch;

// Environment configuration
pub mod config;

// Error types
pub mod error;

// Tracing setup
pub mod logging;
