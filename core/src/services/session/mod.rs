//! Session lifecycle on top of the token codec and the refresh-record store

mod manager;


pub use manager::SessionManager;
