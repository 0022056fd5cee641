pub mod auth;
pub mod csv_export;
pub mod inventory_service;
pub mod stock_status;
