//! Crate-level behavioral tests.

mod normalization;
