pub mod memory;
pub mod prefs;
