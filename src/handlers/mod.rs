// handlers/mod.rs - HTTP adapters over the feature handlers
//
// Public (no auth): /api/auth/*
// Protected (bearer JWT): /api/tasks/*

pub mod extract;
pub mod protected;
pub mod public;
