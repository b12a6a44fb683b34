pub mod crypto;
pub mod entry_codec;
pub mod salary;
pub mod time;
pub mod token;
pub mod validation;
