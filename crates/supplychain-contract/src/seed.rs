use supplychain_types::ProductRecord;

/// The fixed records written by `SeedLedger`, in write order.
pub fn seed_records() -> Vec<ProductRecord> {
    vec![
        ProductRecord::manufactured(
            "PRD001",
            "Widget A",
            "Basic Widget A Description",
            "2023-09-25",
            "BATCH001",
        ),
        ProductRecord::manufactured(
            "PRD002",
            "Widget B",
            "Basic Widget B Description",
            "2023-09-26",
            "BATCH002",
        ),
    ]
}
