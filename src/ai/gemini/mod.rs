pub mod client;
pub mod image;
pub mod text;
pub mod types;

pub use client::GeminiHttpClient;
pub use image::ImagenClient;
pub use text::GeminiTextClient;
