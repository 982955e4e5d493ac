//! Built-in exporter implementations.

mod html;
mod pdf;
mod png;

pub use html::HtmlExporter;
pub use pdf::PdfExporter;
pub use png::PngExporter;

#[cfg(test)]
mod tests;
