// Library exports for the admin user creation tool

pub mod admin;
pub mod config;
pub mod db;
pub mod models;
pub mod password;
