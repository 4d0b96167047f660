//! Command-line interface components
//!
//! This module contains CLI-specific code for the envios driver client,
//! including argument parsing, rendering and user interaction.

pub mod args;
pub mod commands;

pub use args::{Cli, Commands, GlobalArgs, ListArgs, LoginArgs, UpdateArgs, resolve_status};
pub use commands::{
    check_status, handle_list, handle_login, handle_logout, handle_status, handle_statuses, handle_update,
    render_filter_bar, render_shipment,
};
