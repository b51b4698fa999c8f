pub mod event;
pub mod models;
pub mod ports;
pub mod records;
pub mod service;
