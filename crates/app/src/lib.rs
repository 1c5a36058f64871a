//! `tofula` terminal front end.
//!
//! Renders the customer catalog, story detail and library pages and the
//! studio pages as text, backed by [`tofula_client`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod navigator;
pub mod pages;
pub mod view;
