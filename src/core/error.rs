use thiserror::Error;

/// Errors that can occur while planning, rendering or writing invoices.
///
/// Bad row data is never reported here: malformed cells are absorbed into
/// totals during aggregation. Only structural problems with a call and
/// failures of the output side surface as errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BillingError {
    /// A combined document was requested without any invoice in it.
    #[error("at least one invoice is required to build a combined document")]
    EmptyCombination,

    /// A batch plan referenced a customer that has no invoice record.
    #[error("unknown customer: {0}")]
    UnknownCustomer(String),

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// The drawing backend failed to encode the document.
    #[error("render error: {0}")]
    Render(String),

    /// The output sink could not persist a finished document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type BillingResult<T> = Result<T, BillingError>;
