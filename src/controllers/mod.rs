pub mod booking_controller;
pub mod checkpoint_controller;
