//! Controladores
//!
//! Un controlador por recurso. Se construyen por request a partir del
//! `AppState` y devuelven DTOs listos para serializar.

pub mod design_controller;
pub mod lr_controller;
pub mod print_controller;
pub mod share_controller;

pub use design_controller::DesignController;
pub use lr_controller::LrController;
pub use print_controller::PrintController;
pub use share_controller::ShareController;
