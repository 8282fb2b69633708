mod header;
#[allow(clippy::module_inception)]
mod token;
mod validated;

pub use header::TokenHeader;
pub use token::Token;
pub use validated::ValidatedToken;
