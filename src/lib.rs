// Copyright (c) 2026 Pulse Security Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Pulse Security - Scan Backend Library
 * Exposes scanner and lifecycle modules for testing
 *
 * @copyright 2026 Pulse Security Oy
 * @license Proprietary
 */

pub mod api;
pub mod config;
pub mod errors;
pub mod http_client;
pub mod lifecycle;
pub mod orchestrator;
pub mod payloads;
pub mod scanner;
pub mod store;
pub mod types;
