pub mod collect;
pub mod config;
pub mod format;
pub mod fragments;
pub mod template;

pub mod testing;
