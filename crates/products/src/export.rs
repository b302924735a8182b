//! CSV export of the product table.

use thiserror::Error;

use crate::product::Product;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("csv flush failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv output is not utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Render `Name,SKU,Quantity` rows for the given products, in order.
pub fn export_csv(products: &[Product]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Name", "SKU", "Quantity"])?;

    for p in products {
        let quantity = p.quantity.to_string();
        writer.write_record([p.name.as_str(), p.sku.as_str(), quantity.as_str()])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
