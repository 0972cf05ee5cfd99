pub mod profiles;
pub mod scaling;
pub mod tables;
