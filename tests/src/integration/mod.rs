pub mod broadcast;
pub mod lifecycle;
