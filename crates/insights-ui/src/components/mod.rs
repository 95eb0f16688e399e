//! Small reusable rendering pieces shared by the dashboard views.

pub mod header;
