pub mod error;
pub mod model;
pub mod mt103;
pub mod sample;
pub mod serialization;

pub use crate::error::ParseError;
pub use crate::model::{MessageHeader, ParsedMessage, PartyInfo, RawField, Transaction};
pub use crate::mt103::{Mt103Data, parse_message};
pub use crate::sample::sample_message;
