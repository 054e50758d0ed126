//! Order and payment-parameter types.

pub mod order;
pub mod payment;

pub use order::*;
pub use payment::*;
