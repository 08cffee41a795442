pub mod models;
pub mod persistence;
pub mod reader;
pub mod writer;
