//! Spam and phishing-URL classification over externally trained models.
//!
//! [`spam::SpamPredictor`] labels email text, [`phishing::PhishingPredictor`] fetches a
//! page and labels its URL from 27 structural and lexical features.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod models;
pub mod phishing;
pub mod spam;
