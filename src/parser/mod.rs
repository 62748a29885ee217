//
//  mod.rs
//  repograph
//

pub mod cache;
pub mod extractor;
pub mod language;

pub use cache::{CachedImports, ImportCache};
pub use extractor::{ImportExtractor, ModuleSet, ParseError, PythonExtractor};
pub use language::SupportedLanguage;
