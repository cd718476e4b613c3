// Domain layer: ledger models and ports. No knowledge of CSV, HTTP or xlsx.

pub mod model;
pub mod ports;
