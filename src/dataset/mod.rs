pub mod format;
pub mod split;
