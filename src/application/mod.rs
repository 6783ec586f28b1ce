//! Application layer with use cases, services and DTOs.

/// Data transfer objects.
pub mod dto;
/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use dto::{LoginRequest, RegisterRequest};
pub use services::{ComposerAffordance, ConversationTimeline, SearchService, TimelineEvent};
pub use use_cases::{LoginUseCase, RegisterUseCase};
