// Shared data models: wire DTOs and the shared store handle.

pub mod requests;
pub mod responses;
pub mod state;
