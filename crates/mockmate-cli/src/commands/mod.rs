pub mod account;
pub mod config;
pub mod cv;
pub mod interview;
pub mod jobs;
pub mod practice;
