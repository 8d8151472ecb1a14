// tests/property/mod.rs

mod engine;
