pub mod display;
pub mod grouping;
