pub mod client;
pub mod driver;
pub mod request;
pub mod truck;
