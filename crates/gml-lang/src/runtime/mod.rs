pub mod builtins;
pub mod env;
pub mod interpreter;
pub mod value;
