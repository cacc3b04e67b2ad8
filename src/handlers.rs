pub mod catalog;
pub mod clients;
pub mod health;
pub mod sales;
pub mod staff;
