use crate::token::Token;

/// Consumer of a listing's token stream.
///
/// A successful run calls `begin`, then `token` once per token, then `end`.
/// A run rejected for size calls only `oversize`.
pub trait Renderer {
    fn begin(&mut self);
    fn token(&mut self, token: &Token);
    fn end(&mut self);
    fn oversize(&mut self, len: usize);
}
