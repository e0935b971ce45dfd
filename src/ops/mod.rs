pub mod controller;
pub mod stats;
pub mod validate;
pub mod view;
