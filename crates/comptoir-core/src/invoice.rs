//! # Invoice
//!
//! Printable invoice for a single sale.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  EXCEL MASTER SARL                                   FACTURE            │
//! │  Quartier Administratif                              N° INV-2023-001    │
//! │  B.P. 1234, Libreville / Douala                                         │
//! │  Contact: +237 600 000 000                                              │
//! │                                                                         │
//! │  Facturé à: CLIENT PASSAGE          Date d'émission: 2023-11-01         │
//! │  Client Comptant                    Échéance: Immédiate                 │
//! │  Mode: Espèces / Mobile Money                                           │
//! │                                                                         │
//! │  Désignation        Qté    Prix Unitaire          Total                 │
//! │  Laptop Pro           2      780 000 FCFA     1 560 000 FCFA            │
//! │                                                                         │
//! │                             Sous-total        1 560 000 FCFA            │
//! │                             TVA (0%)                  0 FCFA            │
//! │                             NET À PAYER       1 560 000 FCFA            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Walk-in cash sales carry no VAT: the tax line is always computed at a
//! zero rate and shown for the record.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::store::RecordStore;
use crate::types::{SaleRecord, TaxRate};
use crate::INVOICE_NUMBER_PREFIX;

const CUSTOMER_NAME: &str = "CLIENT PASSAGE";
const CUSTOMER_KIND: &str = "Client Comptant";
const PAYMENT_MODE: &str = "Espèces / Mobile Money";
const DUE_TERMS: &str = "Immédiate";
const FOOTER: &str =
    "Merci de votre confiance. Cette facture est générée automatiquement par Excel Master Dashboard.";

/// The business issuing the invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Issuer {
    pub name: String,
    pub address_lines: Vec<String>,
    pub contact: String,
}

impl Default for Issuer {
    fn default() -> Self {
        Issuer {
            name: "EXCEL MASTER SARL".to_string(),
            address_lines: vec![
                "Quartier Administratif".to_string(),
                "B.P. 1234, Libreville / Douala".to_string(),
            ],
            contact: "+237 600 000 000".to_string(),
        }
    }
}

/// One billed product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct InvoiceLine {
    pub designation: String,
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: Money,
    pub total: Money,
}

/// An invoice derived from a recorded sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Invoice {
    pub number: String,
    #[ts(as = "String")]
    pub issued_on: NaiveDate,
    pub due: String,
    pub issuer: Issuer,
    pub customer: String,
    pub customer_kind: String,
    pub payment_mode: String,
    pub lines: Vec<InvoiceLine>,
    pub subtotal: Money,
    pub tax_rate: TaxRate,
    pub tax: Money,
    pub net_total: Money,
}

/// Invoice number of a sale: its first `V` becomes `INV-2023-`.
///
/// ```rust
/// use comptoir_core::invoice::invoice_number;
///
/// assert_eq!(invoice_number("V001"), "INV-2023-001");
/// ```
pub fn invoice_number(sale_id: &str) -> String {
    sale_id.replacen('V', INVOICE_NUMBER_PREFIX, 1)
}

impl Invoice {
    /// Builds the invoice for `sale`. The sale date is the issue date.
    pub fn from_sale(sale: &SaleRecord, issuer: &Issuer) -> Self {
        let tax_rate = TaxRate::zero();
        let subtotal = sale.total;
        let tax = subtotal.calculate_tax(tax_rate);

        Invoice {
            number: invoice_number(&sale.id),
            issued_on: sale.date,
            due: DUE_TERMS.to_string(),
            issuer: issuer.clone(),
            customer: CUSTOMER_NAME.to_string(),
            customer_kind: CUSTOMER_KIND.to_string(),
            payment_mode: PAYMENT_MODE.to_string(),
            lines: vec![InvoiceLine {
                designation: sale.product_name.clone(),
                product_id: sale.product_id.clone(),
                quantity: sale.quantity,
                unit_price: sale.unit_price,
                total: sale.total,
            }],
            subtotal,
            tax_rate,
            tax,
            net_total: subtotal + tax,
        }
    }

    /// Looks up `sale_id` in `store` and builds its invoice.
    pub fn for_sale_id(store: &RecordStore, sale_id: &str, issuer: &Issuer) -> CoreResult<Self> {
        store
            .find_sale(sale_id)
            .map(|sale| Invoice::from_sale(sale, issuer))
            .ok_or_else(|| CoreError::SaleNotFound(sale_id.to_string()))
    }
}

impl fmt::Display for Invoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:<48}{:>24}", self.issuer.name, "FACTURE")?;
        writeln!(f, "{:>72}", format!("N° {}", self.number))?;
        for line in &self.issuer.address_lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f, "Contact: {}", self.issuer.contact)?;
        writeln!(f)?;

        writeln!(f, "Facturé à: {}", self.customer)?;
        writeln!(f, "{}", self.customer_kind)?;
        writeln!(f, "Mode: {}", self.payment_mode)?;
        writeln!(f, "Date d'émission: {}", self.issued_on.format("%Y-%m-%d"))?;
        writeln!(f, "Échéance: {}", self.due)?;
        writeln!(f)?;

        writeln!(
            f,
            "{:<28}{:>6}{:>19}{:>19}",
            "Désignation", "Qté", "Prix Unitaire", "Total"
        )?;
        for line in &self.lines {
            writeln!(
                f,
                "{:<28}{:>6}{:>19}{:>19}",
                line.designation,
                line.quantity,
                line.unit_price.to_string(),
                line.total.to_string()
            )?;
        }
        writeln!(f)?;

        let tax_label = format!("TVA ({}%)", self.tax_rate.percentage());
        writeln!(f, "{:>53}{:>19}", "Sous-total", self.subtotal.to_string())?;
        writeln!(f, "{:>53}{:>19}", tax_label, self.tax.to_string())?;
        writeln!(f, "{:>53}{:>19}", "NET À PAYER", self.net_total.to_string())?;
        writeln!(f)?;

        writeln!(f, "{}", FOOTER)?;
        write!(f, "{:<36}{:>36}", "Cachet Entreprise", "Signature Client")
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
