pub mod caret;
pub mod reconcile;
pub mod shape;
pub mod sync;
