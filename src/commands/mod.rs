pub mod doctor;
pub mod fetch;
pub mod init;
pub mod plan;
pub mod snapshots;
