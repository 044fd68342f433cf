//! Reusable spans built from rendered document elements.

pub mod services;
pub mod status_indicator;
