pub mod classify;
pub mod init_config;
pub mod pools;
pub mod replay;
pub mod suggest;
