//! Domain layer - business logic and services

pub mod events;
pub mod peers;
pub mod repository;
pub mod service;
pub mod validation;

pub use events::{EventPublisher, NoOpEventPublisher, StudentEvent};
pub use peers::PeerGateway;
pub use repository::{AcademicYearRepository, ClassRepository, StudentRepository};
pub use service::Service;
