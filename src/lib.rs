//! Thumbboard library.
//!
//! A small web application for collecting YouTube video thumbnails into
//! named boards, served as an HTML UI plus a JSON API for the companion
//! browser extension.

pub mod components;
pub mod config;
pub mod db;
pub mod web;
pub mod youtube;
