//! Textual encodings of fixture datasets

pub mod csv;
