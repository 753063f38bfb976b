pub mod lexicon;
pub mod loader;

pub use lexicon::{Lexicon, Meanings};
pub use loader::LexiconLoader;
