pub mod describe;
pub mod run;
