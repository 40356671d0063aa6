//! Profile data access: store port, validation rules, account service

pub mod ports;
pub mod service;
pub mod validate;
