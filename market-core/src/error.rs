use thiserror::Error;

pub type Result<T> = std::result::Result<T, MarketError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum MarketError {
    /// The (tax-shifted) curves do not cross at a non-negative price and quantity.
    #[error(
        "no equilibrium at tax {tax_rate}: seller price {seller_price:.2}, quantity {quantity:.2}"
    )]
    NoEquilibrium {
        tax_rate: f64,
        seller_price: f64,
        quantity: f64,
    },

    #[error("invalid market parameters: {0}")]
    InvalidParameters(String),

    #[error("invalid quantity domain: {0}")]
    InvalidDomain(String),

    #[error("invalid tax slider: {0}")]
    InvalidSlider(String),

    #[error("tax {value} outside slider range [{min}, {max}]")]
    TaxOutOfRange { value: f64, min: f64, max: f64 },

    #[error("tax {value} is not a multiple of the slider step {step}")]
    TaxOffStep { value: f64, step: f64 },
}
