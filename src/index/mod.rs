mod identifier;

pub use identifier::{format_lld, parse_lld};
