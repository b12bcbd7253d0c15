pub mod angle;
pub mod request;
pub mod response;
pub mod symbols;
