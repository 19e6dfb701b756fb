//! Client error types and user-facing messages.

mod types;

pub use types::{
    ClientError, ClientResult, DUPLICATE_TRANSACTION_MESSAGE, LOGIN_RATE_LIMIT_MESSAGE,
    NETWORK_ERROR_MESSAGE, STATUS_CONFLICT, STATUS_TOO_MANY_REQUESTS, UNEXPECTED_ERROR_MESSAGE,
};
