// Domain layer - Core business logic

pub mod bitrate;
pub mod model;
pub mod rules;
