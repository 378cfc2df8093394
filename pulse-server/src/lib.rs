//! pulse-server — 360° feedback routing service
//!
//! Employees submit Likert-scale feedback; the service resolves the
//! submitter's manager chain, seals one envelope-encrypted copy per manager
//! (direct for the immediate manager, indirect above), and stores them
//! append-only. Managers unlock their inbox with their own password; nobody
//! else can read their copies.

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod services;
pub mod state;
