// Template rendering and typesetting boundary.
// Implements: LaTeX escaping of free text, template fill, and the external
// typesetting backend behind the `Typesetter` trait.

pub mod escape;
pub mod template;
pub mod typesetter;

pub use typesetter::{PdfLatexTypesetter, TypesetOutput, Typesetter};
