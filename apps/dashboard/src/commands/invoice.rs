//! # Invoice Commands

use comptoir_core::invoice::Invoice;
use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, LedgerState};

/// The invoice as structured data plus its printable text.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceResponse {
    pub invoice: Invoice,
    pub text: String,
}

/// Builds the invoice of sale `sale_id`, issued by the configured store.
pub fn get_invoice(
    ledger: &LedgerState,
    config: &ConfigState,
    sale_id: String,
) -> Result<InvoiceResponse, ApiError> {
    debug!(sale_id = %sale_id, "get_invoice command");

    let issuer = config.issuer();
    let invoice = ledger.with_state(|state| Invoice::for_sale_id(&state.store, &sale_id, &issuer))?;
    let text = invoice.to_string();

    Ok(InvoiceResponse { invoice, text })
}
