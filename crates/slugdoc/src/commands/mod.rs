pub mod init;
pub mod outline;
pub mod routes;
pub mod show;
