pub mod anthropic;
pub mod generate;
pub mod openai;
pub mod persona;
pub mod provider;

pub use generate::{Category, GenerateError, Generator};
