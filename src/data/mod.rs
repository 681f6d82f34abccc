mod record;
mod store;
mod translator;

pub use record::{DictionaryDocument, Entries, TranslationRecord};
pub use store::{DictionaryStore, Languages};
pub use translator::Translator;
