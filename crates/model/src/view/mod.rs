pub mod condition;
pub mod output;
pub mod source;
pub mod spec;
