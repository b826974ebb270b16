pub mod comment;
pub mod court;
pub mod reservation;
pub mod user;
