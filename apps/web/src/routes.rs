pub mod classification;
pub mod form;
pub mod habitability;
pub mod health;
pub mod home;
pub mod report;
