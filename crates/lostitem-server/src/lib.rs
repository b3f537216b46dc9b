//! HTTP surface for the lost-item matcher.

pub mod gateway;
