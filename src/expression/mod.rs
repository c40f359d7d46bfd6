pub mod resolver;
pub mod token;
pub mod tokenizer;

pub use resolver::{parse, parse_with, resolve, ResolvedTerms, Sign};
pub use token::{render_tokens, Token};
pub use tokenizer::{tokenize, ExpressionTokenizer, Tokenizer};
