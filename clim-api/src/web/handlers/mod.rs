pub mod api;
pub mod home;
