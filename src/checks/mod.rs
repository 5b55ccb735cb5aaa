pub mod checker;
pub mod tour;
