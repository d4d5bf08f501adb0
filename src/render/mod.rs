//! Module rendering: color evaluation, shape drawers and the module pass

pub mod color;
pub mod modules;
pub mod shapes;
