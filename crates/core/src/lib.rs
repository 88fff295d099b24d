//! Core business logic for Fairshare.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `currency` - Rate tables, reference-currency conversion and the rate provider
//! - `split` - Proportional bill splitting between two incomes
//! - `history` - Saved calculations and per-owner statistics
//! - `auth` - Password hashing

pub mod auth;
pub mod currency;
pub mod history;
pub mod split;
