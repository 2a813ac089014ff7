pub mod benchmark;
pub mod roster;
pub mod runner;
pub mod util;
