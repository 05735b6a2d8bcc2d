//! Built-in Magento 1 -> Magento 2 order grid documents.

use crate::{error::ConfigError, settings::DocumentSettings};
use serde::Deserialize;

const ORDER_GRIDS_TOML: &str = include_str!("defaults/order_grids.toml");

#[derive(Debug, Deserialize)]
struct DefaultGrids {
    documents: Vec<DocumentSettings>,
}

pub fn order_grid_documents() -> Result<Vec<DocumentSettings>, ConfigError> {
    let grids: DefaultGrids = toml::from_str(ORDER_GRIDS_TOML)?;
    Ok(grids.documents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::documents::DocumentMapping;

    #[test]
    fn test_default_grids() {
        let grids: Vec<DocumentMapping> = order_grid_documents()
            .unwrap()
            .iter()
            .map(|doc| doc.to_mapping().unwrap())
            .collect();
        let destinations: Vec<&str> = grids.iter().map(|g| g.destination.as_str()).collect();
        assert_eq!(
            destinations,
            vec![
                "sales_order_grid",
                "sales_invoice_grid",
                "sales_shipment_grid",
                "sales_creditmemo_grid"
            ]
        );

        for grid in &grids {
            assert_eq!(grid.kind, grid.destination.as_str());
            assert_eq!(grid.columns[0].column, "entity_id");
            assert_eq!(grid.key, vec!["entity_id".to_string()]);
        }
        assert_eq!(grids[0].source.as_str(), "sales_flat_order_grid");
    }
}
