// crates/soundtrim-core/src/helpers/mod.rs

pub mod time;
