//! Token descriptors and the canonical X/Y ordering used by pool deployments.

/// Ledger interface a token contract implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenStandard {
    /// TZIP-7 single-asset ledger; carries no token id.
    Fa12,
    /// TZIP-12 multi-asset ledger; addressed by `(address, token_id)`.
    Fa2,
}

/// A token as identified on chain, plus the decimals used for price display.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub address: String,
    pub token_id: Option<u32>,
    pub decimals: u32,
    pub standard: TokenStandard,
}

impl Token {
    pub fn new(address: String, token_id: Option<u32>, decimals: u32, standard: TokenStandard) -> Self {
        Self {
            address,
            token_id,
            decimals,
            standard,
        }
    }
}

/// Orders two tokens the way the factory does when deploying a pair, so the
/// caller can tell which side of a pool a token sits on.
///
/// FA1.2 sorts before FA2; otherwise the smaller address wins, and for equal
/// addresses the smaller token id wins.
pub fn order_tokens(token_x: Token, token_y: Token) -> (Token, Token) {
    let y_is_fa12 = token_y.token_id.is_none() && token_x.token_id.is_some();
    let y_address_is_smaller = token_y.address < token_x.address;
    let y_token_id_is_smaller = token_x.address == token_y.address
        && token_y.token_id.unwrap_or(0) < token_x.token_id.unwrap_or(0);

    if y_is_fa12 || y_address_is_smaller || y_token_id_is_smaller {
        (token_y, token_x)
    } else {
        (token_x, token_y)
    }
}
