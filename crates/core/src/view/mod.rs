pub mod houses;
pub mod markdown;
pub mod positions;
pub mod surface;
pub mod table;
