pub mod middleware;
pub mod policy;
pub mod tokens;
