//! Command implementations that touch the filesystem directly.

pub mod init;
