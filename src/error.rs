use thiserror::Error;

/// Failure classes surfaced by the ledger, the gateway and the report
/// builders. Glue code wraps these in `anyhow` where extra context helps.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The gateway could not resolve a quote for the symbol.
    #[error("no quote found for {0}")]
    SymbolNotFound(String),

    #[error("no open position for {0}")]
    PositionNotFound(String),

    #[error("insufficient quantity for {symbol}: holding {held}, requested {requested}")]
    InsufficientQuantity {
        symbol: String,
        held: i64,
        requested: i64,
    },

    #[error("{0} is already tracked")]
    DuplicateSymbol(String),

    #[error("not found: {0}")]
    NotFound(String),

    /// An alert must describe a crossing that has not happened yet.
    #[error("price constraint violated: {0}")]
    PriceConstraintViolated(String),

    #[error("market data unavailable: {0}")]
    GatewayUnavailable(String),
}

impl From<reqwest::Error> for DashboardError {
    fn from(err: reqwest::Error) -> Self {
        DashboardError::GatewayUnavailable(err.to_string())
    }
}
