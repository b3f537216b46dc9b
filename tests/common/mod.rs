#![allow(dead_code)]

pub mod encode_stub;
pub mod fixtures;
