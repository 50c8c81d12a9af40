//! Route handlers organized by resource

pub mod health;
pub mod home;
pub mod venues;
pub mod artists;
pub mod shows;
