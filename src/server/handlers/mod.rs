// src/server/handlers/mod.rs
//! HTTP request handlers for the recipe API

pub mod recipes;
