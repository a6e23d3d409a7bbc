//! Command entry points, one module per subcommand

pub mod deploy;
pub mod generate;
pub mod list;
pub mod name;
