//! Request handlers

pub mod expense;
pub mod budget;
pub mod overview;
pub mod health;
