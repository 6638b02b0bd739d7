pub mod ast;
pub mod lexer;
pub mod operator;
pub mod parser;
pub mod token;
