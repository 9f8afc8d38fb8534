pub mod auth;
pub mod health;
pub mod items;
pub mod stores;
pub mod tags;
pub mod users;
