pub mod init;
pub mod learn;
pub mod show;
pub mod validate;
