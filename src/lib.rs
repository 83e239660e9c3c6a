//! Social post generator - turns a business type and a post summary into an
//! AI-written title, description and square photo.
//!
//! Text comes from a structured Gemini call, the image from Imagen using a
//! prompt that embeds the generated title.

pub mod ai;
pub mod app;
pub mod error;
pub mod generator;
pub mod models;
pub mod prompts;

pub use error::{Error, Result};
