pub mod integrators;
pub mod run;
