//! Retail Pay: signed payment parameters for mobile-app in-store retail payments.
//!
//! This is the root crate that hosts integration tests and benchmarks.
//! For actual functionality, use the individual crates directly:
//!
//! - `retail-pay-core`: signer, API client, payment builder
//! - `retail-pay-cli`: command-line signing and URL tool

pub use retail_pay_core as core;

use rayon::prelude::*;
use retail_pay_core::{CommonPaymentParams, PaymentBuilder, Result};
use serde::Serialize;

/// Build payment parameters for many orders in parallel.
///
/// Each order is signed independently against the same builder; the first
/// failure aborts the batch and no partial output is returned.
#[allow(clippy::result_large_err)]
pub fn build_batch<T>(
    builder: &PaymentBuilder,
    orders: &[(T, String)],
) -> Result<Vec<CommonPaymentParams>>
where
    T: Serialize + Sync,
{
    let params = orders
        .par_iter()
        .map(|(order, session_key)| builder.build_payment_params(order, session_key))
        .collect::<Result<Vec<_>>>()?;
    tracing::debug!(count = params.len(), "Built payment params batch");
    Ok(params)
}
