pub mod assets;
pub mod form;
