pub mod document;
pub mod elements;
pub mod file;
