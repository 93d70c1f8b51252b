// src/core/mod.rs

//! Pure command-building logic: quoting, templates, the verbose highlight and
//! the [`context::Shell`] configuration object.

pub mod color;
pub mod context;
pub mod quoting;
pub mod template;
