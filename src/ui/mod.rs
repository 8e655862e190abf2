pub mod calculator;
pub mod compliance;
pub mod components;
pub mod invoice_manager;
pub mod menu;
pub mod reports;
