//! Reactive state management

pub mod wallet;
