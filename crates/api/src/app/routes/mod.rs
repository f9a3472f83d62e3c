pub mod bank;
pub mod sports;
pub mod system;
