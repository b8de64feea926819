//! Data models for Assetdesk

pub mod account;
pub mod assignment;
pub mod computer;
pub mod department;
pub mod employee;
pub mod repair;

// Re-export commonly used types
pub use account::{Account, UserClaims};
pub use assignment::Assignment;
pub use computer::{Computer, ComputerInfo, ComputerStatus};
pub use department::{Department, Role};
pub use employee::Employee;
pub use repair::RepairRecord;
