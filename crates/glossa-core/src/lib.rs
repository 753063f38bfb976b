pub mod dictionary;
pub mod error;
pub mod order;
pub mod preprocess;
pub mod types;

pub use dictionary::{Dictionary, FrequencyFn, FrequencyProvider, zero_frequency};
pub use error::LoadError;
pub use preprocess::degrade;
pub use types::{Definition, Expression, Meaning, Translation};
