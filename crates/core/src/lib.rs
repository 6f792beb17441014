pub mod accounts;
pub mod error;
pub mod imaging;
pub mod naming;
pub mod trip_code;
pub mod types;
pub mod uploads;
