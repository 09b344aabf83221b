mod flags;
mod parse;

pub use flags::{FLAGS, Flag, FlagSpec, command, resolve, usage, validate_table};
pub use parse::{ParsedOptions, parse, utf8_args};
