pub mod affix;
pub mod canonical;
