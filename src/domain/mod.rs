pub mod age;
pub mod models;
pub mod rank;
pub mod stats;
