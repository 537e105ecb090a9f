//! Assembly of the sales/rent table pair into one report.
//!
//! The combined pipeline fetches the same base URL twice (`pn=0` sales,
//! `pn=1` rent), normalizes each table independently, then concatenates
//! them here: sales first, each table's internal order preserved, no
//! deduplication and no re-sorting. The single-table pipeline skips this
//! module entirely, since assembly of one table is the identity.

use crate::error::ReportError;
use crate::models::{ListingType, ReportTable};
use tracing::{info, instrument};

/// Stamp every row of `table` with the given listing tag.
pub fn tag(table: &mut ReportTable, listing: ListingType) {
    for row in table.iter_mut() {
        row.listing_type = Some(listing);
    }
}

/// Concatenate the normalized sales and rent tables, sales first.
///
/// If either table is absent (its fetch found no statistics table), the
/// combined report is aborted with [`ReportError::PartialAssembly`];
/// a half-report must never be written.
#[instrument(level = "info", skip_all)]
pub fn combine(
    sales: Option<ReportTable>,
    rent: Option<ReportTable>,
) -> Result<ReportTable, ReportError> {
    let mut sales = sales.ok_or(ReportError::PartialAssembly {
        listing: ListingType::Sales,
    })?;
    let mut rent = rent.ok_or(ReportError::PartialAssembly {
        listing: ListingType::Rent,
    })?;

    tag(&mut sales, ListingType::Sales);
    tag(&mut rent, ListingType::Rent);

    info!(
        sales_rows = sales.len(),
        rent_rows = rent.len(),
        "Assembled combined report"
    );
    sales.extend(rent);
    Ok(sales)
}
