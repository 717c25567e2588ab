pub mod cleanup;
pub mod dom;
pub mod maxims;
pub mod merge;
pub mod poems;
